//! xsdur CLI - format, parse and validate `PnYnMnDTnHnMnS` durations.
//!
//! ```text
//! xsdur format 5400000000000              PT1H30M
//! xsdur format --from seconds -- -5       -PT5S
//! xsdur parse --unit seconds PT1H30M      5400
//! xsdur check service.toml --key retry.delay
//! ```
//!
//! Results go to stdout and diagnostics to stderr. Any invalid input makes the
//! exit status non-zero once every input has been processed.
//!
//! # Configuration
//!
//! Settings come from `~/.xsdur/config.toml` (or `$XSDUR_CONFIG`, or `--config`).
//! The parse output unit is resolved as `--unit`, then `$XSDUR_OUTPUT`, then the
//! config file. The log filter is `$XSDUR_LOG`, then the config file, then `warn`.

mod check;
mod render;

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use toml::Table;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use xsdur_config::{OutputUnit, Settings};
use xsdur_types::Duration;

use crate::check::check_document;
use crate::render::{InputUnit, render};

const LOG_ENV: &str = "XSDUR_LOG";
const OUTPUT_ENV: &str = "XSDUR_OUTPUT";

#[derive(Debug, Parser)]
#[command(name = "xsdur", version, about)]
struct Cli {
    /// Config file [default: $XSDUR_CONFIG or ~/.xsdur/config.toml]
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Format signed integer counts as duration text, one per line
    Format {
        /// Unit of the given counts
        #[arg(long, value_enum, default_value = "nanos")]
        from: InputUnit,

        #[arg(required = true, allow_negative_numbers = true)]
        counts: Vec<i64>,
    },
    /// Parse duration text and print each value in the output unit
    Parse {
        /// nanos, micros, millis, seconds or text
        #[arg(long)]
        unit: Option<OutputUnit>,

        #[arg(required = true, allow_hyphen_values = true)]
        texts: Vec<String>,
    },
    /// Validate duration strings in a TOML document
    Check {
        file: PathBuf,

        /// Dotted key path to check (repeatable); default is every duration-looking string
        #[arg(long = "key", value_name = "DOTTED.PATH")]
        keys: Vec<String>,
    },
}

/// Returns warnings about ignored filters; they can only be logged once the
/// subscriber is installed.
fn init_tracing(config_filter: Option<&str>) -> Vec<String> {
    let mut warnings = Vec::new();
    let from_env = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => Some(filter),
        Err(err) => {
            if env::var_os(LOG_ENV).is_some() {
                warnings.push(format!("Ignoring {LOG_ENV}: {err}"));
            }
            None
        }
    };
    let from_config = || {
        let directive = config_filter?;
        EnvFilter::try_new(directive)
            .inspect_err(|err| {
                warnings.push(format!("Ignoring log.filter `{directive}`: {err}"));
            })
            .ok()
    };
    let env_filter = from_env
        .or_else(from_config)
        .unwrap_or_else(|| EnvFilter::new("warn"));

    // stdout carries results; logs must never interleave with them.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(env_filter)
        .init();
    warnings
}

fn load_settings(path: Option<&Path>) -> (Settings, Option<String>) {
    let loaded = match path {
        Some(path) if !path.exists() => {
            let warning = format!("Config file {} not found; using defaults", path.display());
            return (Settings::default(), Some(warning));
        }
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    match loaded {
        Ok(settings) => (settings.unwrap_or_default(), None),
        Err(err) => (Settings::default(), Some(format!("{err}; using defaults"))),
    }
}

fn output_unit_from_env() -> Option<OutputUnit> {
    let value = env::var(OUTPUT_ENV).ok()?;
    match value.parse() {
        Ok(unit) => Some(unit),
        Err(err) => {
            tracing::warn!("Ignoring {OUTPUT_ENV}: {err}");
            None
        }
    }
}

fn exit_status(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_format(from: InputUnit, counts: &[i64]) -> ExitCode {
    let mut failed = false;
    for &count in counts {
        match from.scale(count) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!(
                    "error: {count} {} exceeds the duration range",
                    from.as_str()
                );
                failed = true;
            }
        }
    }
    exit_status(failed)
}

fn run_parse(texts: &[String], unit: OutputUnit) -> ExitCode {
    let mut failed = false;
    for text in texts {
        match text.parse::<Duration>() {
            Ok(value) => println!("{}", render(value, unit)),
            Err(err) => {
                eprintln!("error: {err}");
                failed = true;
            }
        }
    }
    exit_status(failed)
}

fn run_check(file: &Path, keys: &[String], settings: &Settings) -> Result<ExitCode> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let doc: Table = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", file.display()))?;

    let findings = check_document(&doc, keys, settings.check_max());
    tracing::info!(
        file = %file.display(),
        checked = findings.len(),
        "Checked document"
    );

    let mut failed = false;
    for finding in &findings {
        if finding.is_valid() {
            println!("{finding}");
        } else {
            eprintln!("{finding}");
            failed = true;
        }
    }
    Ok(exit_status(failed))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (settings, config_warning) = load_settings(cli.config.as_deref());
    let filter_warnings = init_tracing(settings.log_filter());
    for warning in config_warning.into_iter().chain(filter_warnings) {
        tracing::warn!("{warning}");
    }

    match cli.command {
        Command::Format { from, counts } => Ok(run_format(from, &counts)),
        Command::Parse { unit, texts } => {
            let unit = unit
                .or_else(output_unit_from_env)
                .unwrap_or(settings.output_unit());
            tracing::debug!(%unit, count = texts.len(), "Parsing");
            Ok(run_parse(&texts, unit))
        }
        Command::Check { file, keys } => run_check(&file, &keys, &settings),
    }
}
