//! Core duration types for xsdur.
//!
//! This crate contains the duration value and its text codec with no IO, no async,
//! and minimal dependencies. Everything here can be used from any layer of the application.
//!
//! The notation is an XML-Schema-style duration, `[-]P[nY][nM][nD][T[nH][nM][nS]]`:
//!
//! ```
//! use xsdur_types::Duration;
//!
//! let d: Duration = "PT1H30M".parse().unwrap();
//! assert_eq!(d, Duration::from_minutes(90));
//! assert_eq!(d.to_string(), "PT1H30M");
//! ```

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod codec;
mod convert;
mod duration;
mod error;

pub use codec::{format, marshal_text, parse, unmarshal_text};
pub use convert::ConversionError;
pub use duration::{
    Duration, NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_MINUTE,
    NANOS_PER_MONTH, NANOS_PER_SECOND, NANOS_PER_YEAR,
};
pub use error::{Component, InvalidFormat, InvalidReason};
