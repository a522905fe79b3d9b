//! Parse failure for duration text.

use std::fmt;

use thiserror::Error;

/// A numeric component of the duration notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Component {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Component::Years => "years",
            Component::Months => "months",
            Component::Days => "days",
            Component::Hours => "hours",
            Component::Minutes => "minutes",
            Component::Seconds => "seconds",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule of the notation the input broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("expected [-]P[nY][nM][nD][T[nH][nM][nS]]")]
    Pattern,
    #[error("at least one component is required")]
    NoComponents,
    #[error("malformed time part")]
    TimePart,
    #[error("{0} out of range")]
    ComponentRange(Component),
    #[error("total exceeds the representable range")]
    Overflow,
    #[error("text is not valid UTF-8")]
    Utf8,
}

/// Text that does not conform to the duration notation.
///
/// This is the only error the codec produces. It keeps the offending input
/// for diagnostics; there is never a partial result alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid duration ({input}): {reason}")]
pub struct InvalidFormat {
    input: String,
    reason: InvalidReason,
}

impl InvalidFormat {
    pub(crate) fn new(input: impl Into<String>, reason: InvalidReason) -> Self {
        Self {
            input: input.into(),
            reason,
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub const fn reason(&self) -> InvalidReason {
        self.reason
    }
}
