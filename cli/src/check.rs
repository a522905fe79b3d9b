//! Duration validation for string values inside a TOML document.
//!
//! Values are either addressed explicitly by dotted key path, or discovered by
//! walking the document for strings that look like `[-]P<digit>...` or `[-]PT...`.

use std::fmt;

use thiserror::Error;
use toml::{Table, Value};
use xsdur_types::{Duration, InvalidFormat};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("missing key")]
    Missing,
    #[error("expected a duration string, found {0}")]
    NotString(&'static str),
    #[error(transparent)]
    Format(#[from] InvalidFormat),
    #[error("{value} exceeds the configured maximum {max}")]
    TooLarge { value: Duration, max: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Valid { path: String, value: Duration },
    Invalid { path: String, error: CheckError },
}

impl Finding {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Finding::Valid { .. })
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Valid { path, value } => write!(f, "{path} = \"{value}\""),
            Finding::Invalid { path, error } => write!(f, "{path}: {error}"),
        }
    }
}

/// Check `keys` in `doc`, or every duration-looking string when `keys` is empty.
///
/// `max` bounds the magnitude, so `-P40D` fails a `P30D` maximum too.
#[must_use]
pub fn check_document(doc: &Table, keys: &[String], max: Option<Duration>) -> Vec<Finding> {
    let candidates: Vec<(String, Option<&Value>)> = if keys.is_empty() {
        let mut found = Vec::new();
        for (key, value) in doc {
            discover(key.clone(), value, &mut found);
        }
        found
    } else {
        keys.iter()
            .map(|key| (key.clone(), lookup(doc, key)))
            .collect()
    };

    candidates
        .into_iter()
        .map(|(path, value)| match check_value(value, max) {
            Ok(value) => Finding::Valid { path, value },
            Err(error) => Finding::Invalid { path, error },
        })
        .collect()
}

fn check_value(value: Option<&Value>, max: Option<Duration>) -> Result<Duration, CheckError> {
    let value = value.ok_or(CheckError::Missing)?;
    let text = value
        .as_str()
        .ok_or_else(|| CheckError::NotString(value.type_str()))?;
    let duration: Duration = text.parse()?;
    if let Some(max) = max
        && duration.unsigned_abs() > max.unsigned_abs()
    {
        return Err(CheckError::TooLarge {
            value: duration,
            max,
        });
    }
    Ok(duration)
}

/// Resolves paths in the form `discover` reports them: `a.b`, `a.b[0]`, `a[1][2].c`.
fn lookup<'a>(doc: &'a Table, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let (key, indices) = split_indices(segments.next()?);
    let mut current = index_into(doc.get(key)?, indices)?;
    for segment in segments {
        let (key, indices) = split_indices(segment);
        current = index_into(current.as_table()?.get(key)?, indices)?;
    }
    Some(current)
}

fn split_indices(segment: &str) -> (&str, &str) {
    segment.split_at(segment.find('[').unwrap_or(segment.len()))
}

fn index_into<'a>(mut value: &'a Value, mut indices: &str) -> Option<&'a Value> {
    while !indices.is_empty() {
        let (index, rest) = indices.strip_prefix('[')?.split_once(']')?;
        value = value.as_array()?.get(index.parse::<usize>().ok()?)?;
        indices = rest;
    }
    Some(value)
}

fn discover<'a>(path: String, value: &'a Value, out: &mut Vec<(String, Option<&'a Value>)>) {
    match value {
        Value::String(text) if looks_like_duration(text) => out.push((path, Some(value))),
        Value::Table(table) => {
            for (key, child) in table {
                discover(format!("{path}.{key}"), child, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                discover(format!("{path}[{index}]"), child, out);
            }
        }
        _ => {}
    }
}

/// `P` (optionally signed) followed by a digit or the time designator.
fn looks_like_duration(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    unsigned
        .strip_prefix('P')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|next| next.is_ascii_digit() || next == 'T')
}
