//! Configuration loading for xsdur.
//!
//! Raw TOML deserialization structs (with `Option` fields) stay private to this
//! crate. The loader resolves them into [`Settings`] at the parse boundary, so a
//! `Settings` value is always valid.
//!
//! ```toml
//! [output]
//! unit = "seconds"
//!
//! [log]
//! filter = "xsdur=debug"
//!
//! [check]
//! max = "P30D"
//! ```

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use xsdur_types::Duration;

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "XSDUR_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown output unit `{0}` (expected nanos, micros, millis, seconds or text)")]
    UnknownUnit(String),
}

/// How parsed durations are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputUnit {
    #[default]
    Nanos,
    Micros,
    Millis,
    Seconds,
    /// Canonical duration text.
    Text,
}

impl OutputUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OutputUnit::Nanos => "nanos",
            OutputUnit::Micros => "micros",
            OutputUnit::Millis => "millis",
            OutputUnit::Seconds => "seconds",
            OutputUnit::Text => "text",
        }
    }
}

impl FromStr for OutputUnit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nanos" | "ns" => Ok(OutputUnit::Nanos),
            "micros" | "us" => Ok(OutputUnit::Micros),
            "millis" | "ms" => Ok(OutputUnit::Millis),
            "seconds" | "secs" | "s" => Ok(OutputUnit::Seconds),
            "text" => Ok(OutputUnit::Text),
            _ => Err(ConfigError::UnknownUnit(s.to_string())),
        }
    }
}

impl fmt::Display for OutputUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    output: Option<RawOutput>,
    log: Option<RawLog>,
    check: Option<RawCheck>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOutput {
    unit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLog {
    filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCheck {
    max: Option<Duration>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    output_unit: OutputUnit,
    log_filter: Option<String>,
    check_max: Option<Duration>,
}

impl TryFrom<RawConfig> for Settings {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let output_unit = raw
            .output
            .and_then(|output| output.unit)
            .map(|unit| unit.parse::<OutputUnit>())
            .transpose()?
            .unwrap_or_default();
        let log_filter = raw
            .log
            .and_then(|log| log.filter)
            .map(|filter| filter.trim().to_string())
            .filter(|filter| !filter.is_empty());
        // An empty `max` is the zero duration, which means "no bound".
        let check_max = raw
            .check
            .and_then(|check| check.max)
            .filter(|max| !max.is_zero());
        Ok(Self {
            output_unit,
            log_filter,
            check_max,
        })
    }
}

impl Settings {
    #[must_use]
    pub const fn output_unit(&self) -> OutputUnit {
        self.output_unit
    }

    #[must_use]
    pub fn log_filter(&self) -> Option<&str> {
        self.log_filter.as_deref()
    }

    /// Upper bound on the magnitude of durations accepted by `check`.
    #[must_use]
    pub const fn check_max(&self) -> Option<Duration> {
        self.check_max
    }

    /// Load from the default location. `Ok(None)` when there is no config file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file");
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::try_from(raw)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(Some(settings))
    }
}

/// `$XSDUR_CONFIG` if set, otherwise `~/.xsdur/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".xsdur").join("config.toml"))
}
