//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run the `xsdur` binary with an isolated config location and logging off.
pub fn run_xsdur(home: &TempDir, args: &[&str]) -> Output {
    run_xsdur_with_env(home, args, &[])
}

pub fn run_xsdur_with_env(home: &TempDir, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_xsdur"));
    cmd.args(args)
        .env("XSDUR_CONFIG", home.path().join("config.toml"))
        .env("XSDUR_LOG", "off")
        .env_remove("XSDUR_OUTPUT");
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("xsdur binary runs")
}

/// Like `run_xsdur`, but with `XSDUR_LOG` unset so the config's filter (or `warn`) applies.
pub fn run_xsdur_logging(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xsdur"))
        .args(args)
        .env("XSDUR_CONFIG", home.path().join("config.toml"))
        .env_remove("XSDUR_LOG")
        .env_remove("XSDUR_OUTPUT")
        .output()
        .expect("xsdur binary runs")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("fixture is writable");
    path
}
