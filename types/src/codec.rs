//! `[-]P[nY][nM][nD][T[nH][nM][nS]]` text codec.
//!
//! [`format`] only ever emits the time half (`PT..H..M..S`), while [`parse`]
//! also accepts years, months and days using fixed 365/30/1-day conversions.
//! Zero is the empty string in both directions.

use std::fmt::Write;
use std::iter;
use std::str;
use std::sync::LazyLock;

use regex::Regex;

use crate::duration::{
    Duration, NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_MONTH, NANOS_PER_SECOND,
    NANOS_PER_YEAR,
};
use crate::error::{Component, InvalidFormat, InvalidReason};

/// Whole value: sign, date components, and an opaque time part after `T`.
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?)P(?:([0-9]+)Y)?(?:([0-9]+)M)?(?:([0-9]+)D)?(?:T(.+))?$")
        .expect("duration pattern is valid")
});

/// Time part: hours, minutes, and seconds with an optional fraction.
static DURATION_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([0-9]+)H)?(?:([0-9]+)M)?(?:([0-9]+)(?:\.([0-9]+))?S)?$")
        .expect("duration time pattern is valid")
});

const HOUR: u64 = NANOS_PER_HOUR.unsigned_abs();
const MINUTE: u64 = NANOS_PER_MINUTE.unsigned_abs();
const SECOND: u64 = NANOS_PER_SECOND.unsigned_abs();
const FRACTION_DIGITS: usize = 9;

/// Format a duration as text.
///
/// Returns an empty string for zero. Everything else is `PT` followed by
/// the non-zero hour, minute and second components, with the sign in front.
///
/// ```
/// use xsdur_types::{Duration, format};
///
/// assert_eq!(format(Duration::from_minutes(90)), "PT1H30M");
/// assert_eq!(format(Duration::from_millis(-1500)), "-PT1.5S");
/// assert_eq!(format(Duration::ZERO), "");
/// ```
#[must_use]
pub fn format(value: Duration) -> String {
    if value.is_zero() {
        return String::new();
    }

    let mut out = String::with_capacity(24);
    if value.is_negative() {
        out.push('-');
    }
    out.push_str("PT");

    let abs = value.unsigned_abs();
    let h = abs / HOUR;
    let m = abs % HOUR / MINUTE;
    let s = abs % MINUTE / SECOND;
    let ns = abs % SECOND;
    if h > 0 {
        let _ = write!(out, "{h}H");
    }
    if m > 0 {
        let _ = write!(out, "{m}M");
    }
    if s > 0 || ns > 0 {
        let _ = write!(out, "{s}");
        if ns > 0 {
            let fraction = format!("{ns:09}");
            out.push('.');
            out.push_str(fraction.trim_end_matches('0'));
        }
        out.push('S');
    }

    out
}

/// Parse duration text.
///
/// Empty text is [`Duration::ZERO`]. Otherwise at least one component must
/// be present, and only seconds may carry a fraction. Fraction digits past
/// nanosecond resolution are truncated.
///
/// ```
/// use xsdur_types::{Duration, parse};
///
/// assert_eq!(parse("P1DT2H").unwrap(), Duration::from_hours(26));
/// assert!(parse("PT").is_err());
/// ```
pub fn parse(text: &str) -> Result<Duration, InvalidFormat> {
    if text.is_empty() {
        return Ok(Duration::ZERO);
    }

    let invalid = |reason: InvalidReason| InvalidFormat::new(text, reason);

    let caps = DURATION_RE
        .captures(text)
        .ok_or_else(|| invalid(InvalidReason::Pattern))?;
    if (2..=5).all(|group| caps.get(group).is_none()) {
        return Err(invalid(InvalidReason::NoComponents));
    }

    // i128 holds the sum of every component at u64 scale without overflowing.
    let mut total: i128 = 0;
    let date = [
        (2, Component::Years, NANOS_PER_YEAR),
        (3, Component::Months, NANOS_PER_MONTH),
        (4, Component::Days, NANOS_PER_DAY),
    ];
    for (group, component, unit) in date {
        if let Some(digits) = caps.get(group) {
            total += scaled(digits.as_str(), component, unit).map_err(invalid)?;
        }
    }
    if let Some(time) = caps.get(5) {
        total += parse_time(time.as_str()).map_err(invalid)?;
    }

    if &caps[1] == "-" {
        total = -total;
    }
    let nanos = i64::try_from(total).map_err(|_| invalid(InvalidReason::Overflow))?;
    Ok(Duration::from_nanos(nanos))
}

fn parse_time(text: &str) -> Result<i128, InvalidReason> {
    let caps = DURATION_TIME_RE
        .captures(text)
        .ok_or(InvalidReason::TimePart)?;

    let mut total: i128 = 0;
    if let Some(digits) = caps.get(1) {
        total += scaled(digits.as_str(), Component::Hours, NANOS_PER_HOUR)?;
    }
    if let Some(digits) = caps.get(2) {
        total += scaled(digits.as_str(), Component::Minutes, NANOS_PER_MINUTE)?;
    }
    if let Some(digits) = caps.get(3) {
        total += scaled(digits.as_str(), Component::Seconds, NANOS_PER_SECOND)?;
        if let Some(fraction) = caps.get(4) {
            total += fraction_nanos(fraction.as_str());
        }
    }
    Ok(total)
}

fn scaled(digits: &str, component: Component, unit: i64) -> Result<i128, InvalidReason> {
    let count: u64 = digits
        .parse()
        .map_err(|_| InvalidReason::ComponentRange(component))?;
    Ok(i128::from(count) * i128::from(unit))
}

/// Scale ASCII fraction digits to nanoseconds, truncating past the ninth digit.
fn fraction_nanos(digits: &str) -> i128 {
    digits
        .bytes()
        .chain(iter::repeat(b'0'))
        .take(FRACTION_DIGITS)
        .fold(0, |acc, digit| acc * 10 + i128::from(digit - b'0'))
}

/// Text-marshalling hook: the formatted bytes, empty for zero. Never fails.
#[must_use]
pub fn marshal_text(value: Duration) -> Vec<u8> {
    format(value).into_bytes()
}

/// Text-unmarshalling hook. `None` and empty input are [`Duration::ZERO`].
pub fn unmarshal_text(text: Option<&[u8]>) -> Result<Duration, InvalidFormat> {
    let Some(bytes) = text else {
        return Ok(Duration::ZERO);
    };
    let text = str::from_utf8(bytes)
        .map_err(|_| InvalidFormat::new(String::from_utf8_lossy(bytes), InvalidReason::Utf8))?;
    parse(text)
}
