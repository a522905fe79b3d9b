//! Rendering durations in a chosen unit, and scaling integer input into one.

use clap::ValueEnum;
use xsdur_config::OutputUnit;
use xsdur_types::{Duration, NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_SECOND};

/// Unit of the integer counts given to `xsdur format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputUnit {
    #[default]
    Nanos,
    Micros,
    Millis,
    Seconds,
}

impl InputUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            InputUnit::Nanos => "nanos",
            InputUnit::Micros => "micros",
            InputUnit::Millis => "millis",
            InputUnit::Seconds => "seconds",
        }
    }

    /// `None` when `count` of this unit overflows the i64 nanosecond range.
    #[must_use]
    pub const fn scale(self, count: i64) -> Option<Duration> {
        let per_unit = match self {
            InputUnit::Nanos => 1,
            InputUnit::Micros => NANOS_PER_MICRO,
            InputUnit::Millis => NANOS_PER_MILLI,
            InputUnit::Seconds => NANOS_PER_SECOND,
        };
        match count.checked_mul(per_unit) {
            Some(nanos) => Some(Duration::from_nanos(nanos)),
            None => None,
        }
    }
}

#[must_use]
pub fn render(value: Duration, unit: OutputUnit) -> String {
    match unit {
        OutputUnit::Nanos => value.as_nanos().to_string(),
        OutputUnit::Micros => decimal(value, NANOS_PER_MICRO),
        OutputUnit::Millis => decimal(value, NANOS_PER_MILLI),
        OutputUnit::Seconds => decimal(value, NANOS_PER_SECOND),
        OutputUnit::Text => value.to_string(),
    }
}

/// Exact decimal rendering of `value / per_unit`, trailing zeros trimmed.
fn decimal(value: Duration, per_unit: i64) -> String {
    let per_unit = per_unit.unsigned_abs();
    let sign = if value.is_negative() { "-" } else { "" };
    let abs = value.unsigned_abs();
    let whole = abs / per_unit;
    let rem = abs % per_unit;
    if rem == 0 {
        return format!("{sign}{whole}");
    }
    let width = per_unit.ilog10() as usize;
    let fraction = format!("{rem:0width$}");
    format!("{sign}{whole}.{}", fraction.trim_end_matches('0'))
}
