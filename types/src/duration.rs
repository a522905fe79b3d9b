//! Signed nanosecond duration value.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use serde::de::{Error, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec;
use crate::error::InvalidFormat;

pub const NANOS_PER_MICRO: i64 = 1_000;
pub const NANOS_PER_MILLI: i64 = 1_000_000;
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
pub const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
pub const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;
/// A month is assumed to be 30 days.
pub const NANOS_PER_MONTH: i64 = 30 * NANOS_PER_DAY;
/// A year is assumed to be a non-leap year of 365 days.
pub const NANOS_PER_YEAR: i64 = 365 * NANOS_PER_DAY;

/// A signed time span with nanosecond resolution.
///
/// Zero is the "empty" value: it formats to an empty string, and empty or
/// absent text parses back to it. The sign applies to the whole span.
///
/// Text conversion goes through [`Display`](fmt::Display) / [`FromStr`], and
/// serde uses the same notation, so a `Duration` field in a TOML or JSON
/// document reads and writes `"PT1H30M"`-style strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(i64);

impl Duration {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(i64::MAX);
    pub const MIN: Self = Self(i64::MIN);

    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    // The unit constructors saturate at the i64 nanosecond range.

    #[must_use]
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros.saturating_mul(NANOS_PER_MICRO))
    }

    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(NANOS_PER_MILLI))
    }

    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(NANOS_PER_SECOND))
    }

    #[must_use]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes.saturating_mul(NANOS_PER_MINUTE))
    }

    #[must_use]
    pub const fn from_hours(hours: i64) -> Self {
        Self(hours.saturating_mul(NANOS_PER_HOUR))
    }

    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        Self(days.saturating_mul(NANOS_PER_DAY))
    }

    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Magnitude in nanoseconds. Total for every value, `MIN` included.
    #[must_use]
    pub const fn unsigned_abs(self) -> u64 {
        self.0.unsigned_abs()
    }

    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(nanos) => Some(Self(nanos)),
            None => None,
        }
    }

    #[must_use]
    pub const fn checked_neg(self) -> Option<Self> {
        match self.0.checked_neg() {
            Some(nanos) => Some(Self(nanos)),
            None => None,
        }
    }
}

impl Neg for Duration {
    type Output = Self;

    /// Negates like `i64`: overflows on [`Duration::MIN`].
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<i64> for Duration {
    fn from(nanos: i64) -> Self {
        Self(nanos)
    }
}

impl From<Duration> for i64 {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::format(*self))
    }
}

impl FromStr for Duration {
    type Err = InvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::parse(s)
    }
}

impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&codec::format(*self))
    }
}

impl<'de> Deserialize<'de> for Duration {
    /// Accepts duration text. `null`, unit, and a missing struct field all
    /// decode to [`Duration::ZERO`].
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(DurationVisitor)
    }
}

struct DurationVisitor;

impl<'de> Visitor<'de> for DurationVisitor {
    type Value = Duration;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a duration string like \"PT1H30M\"")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Duration::ZERO)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Duration::ZERO)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(self)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        codec::parse(v).map_err(E::custom)
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: Error,
    {
        codec::unmarshal_text(Some(v)).map_err(E::custom)
    }
}
