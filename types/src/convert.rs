//! Conversions to and from `std::time::Duration` and `chrono::TimeDelta`.

use std::time::Duration as StdDuration;

use chrono::TimeDelta;
use thiserror::Error;

use crate::duration::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("negative duration has no unsigned equivalent")]
    Negative,
    #[error("duration exceeds the i64 nanosecond range")]
    OutOfRange,
}

impl TryFrom<StdDuration> for Duration {
    type Error = ConversionError;

    fn try_from(value: StdDuration) -> Result<Self, Self::Error> {
        i64::try_from(value.as_nanos())
            .map(Duration::from_nanos)
            .map_err(|_| ConversionError::OutOfRange)
    }
}

impl TryFrom<Duration> for StdDuration {
    type Error = ConversionError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        u64::try_from(value.as_nanos())
            .map(StdDuration::from_nanos)
            .map_err(|_| ConversionError::Negative)
    }
}

impl From<Duration> for TimeDelta {
    fn from(value: Duration) -> Self {
        TimeDelta::nanoseconds(value.as_nanos())
    }
}

impl TryFrom<TimeDelta> for Duration {
    type Error = ConversionError;

    fn try_from(value: TimeDelta) -> Result<Self, Self::Error> {
        value
            .num_nanoseconds()
            .map(Duration::from_nanos)
            .ok_or(ConversionError::OutOfRange)
    }
}
