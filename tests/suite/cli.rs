//! End-to-end runs of the `xsdur` binary

use insta::assert_snapshot;
use tempfile::tempdir;

use crate::common::{run_xsdur, run_xsdur_logging, run_xsdur_with_env, stderr, stdout, write_file};

#[test]
fn format_nanos() {
    let home = tempdir().unwrap();
    let output = run_xsdur(&home, &["format", "5400000000000", "0", "1500000000"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "PT1H30M\n\nPT1.5S\n");
}

#[test]
fn format_negative_seconds() {
    let home = tempdir().unwrap();
    let output = run_xsdur(&home, &["format", "--from", "seconds", "-5"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_snapshot!(stdout(&output).trim_end(), @"-PT5S");
}

#[test]
fn format_out_of_range_count_fails_after_all_inputs() {
    let home = tempdir().unwrap();
    let output = run_xsdur(
        &home,
        &["format", "--from", "seconds", "10000000000", "5", "-10000000000"],
    );
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "PT5S\n");
    let stderr = stderr(&output);
    assert!(
        stderr.contains("error: 10000000000 seconds exceeds the duration range"),
        "{stderr}"
    );
    assert!(
        stderr.contains("error: -10000000000 seconds exceeds the duration range"),
        "{stderr}"
    );
}

#[test]
fn parse_default_unit_is_nanos() {
    let home = tempdir().unwrap();
    let output = run_xsdur(&home, &["parse", "PT1H30M", "P1DT2H"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "5400000000000\n93600000000000\n");
}

#[test]
fn parse_unit_flag_and_negative_text() {
    let home = tempdir().unwrap();
    let output = run_xsdur(&home, &["parse", "--unit", "seconds", "--", "-PT1.5S", "PT2M"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "-1.5\n120\n");
}

#[test]
fn parse_unit_from_config_and_env() {
    let home = tempdir().unwrap();
    write_file(home.path(), "config.toml", "[output]\nunit = \"millis\"\n");

    let output = run_xsdur(&home, &["parse", "PT1.5S"]);
    assert_eq!(stdout(&output), "1500\n");

    let output = run_xsdur_with_env(&home, &["parse", "PT1.5S"], &[("XSDUR_OUTPUT", "text")]);
    assert_eq!(stdout(&output), "PT1.5S\n");
}

#[test]
fn parse_failure_sets_exit_status_after_all_inputs() {
    let home = tempdir().unwrap();
    let output = run_xsdur(&home, &["parse", "PT", "PT1S"]);
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "1000000000\n");
    assert!(stderr(&output).contains("invalid duration (PT)"));
}

#[test]
fn check_document_with_max() {
    let home = tempdir().unwrap();
    write_file(home.path(), "config.toml", "[check]\nmax = \"P1D\"\n");
    let doc = write_file(
        home.path(),
        "service.toml",
        "[timeouts]\nconnect = \"PT5S\"\ndrain = \"P2D\"\n",
    );

    let output = run_xsdur(&home, &["check", doc.to_str().unwrap()]);
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "timeouts.connect = \"PT5S\"\n");
    assert!(
        stderr(&output).contains("timeouts.drain: PT48H exceeds the configured maximum PT24H"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn check_explicit_key() {
    let home = tempdir().unwrap();
    let doc = write_file(home.path(), "service.toml", "[retry]\ndelay = \"PT1H30M\"\n");

    let output = run_xsdur(
        &home,
        &["check", doc.to_str().unwrap(), "--key", "retry.delay"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "retry.delay = \"PT1H30M\"\n");
}

#[test]
fn check_key_with_array_index() {
    let home = tempdir().unwrap();
    let doc = write_file(
        home.path(),
        "service.toml",
        "[retry]\nbackoff = [\"PT1S\", \"PT1M30S\"]\n",
    );

    let output = run_xsdur(
        &home,
        &["check", doc.to_str().unwrap(), "--key", "retry.backoff[1]"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "retry.backoff[1] = \"PT1M30S\"\n");
}

#[test]
fn check_missing_file_fails() {
    let home = tempdir().unwrap();
    let missing = home.path().join("absent.toml");
    let output = run_xsdur(&home, &["check", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read"));
}

#[test]
fn broken_config_falls_back_to_defaults() {
    let home = tempdir().unwrap();
    write_file(home.path(), "config.toml", "[output]\nunit = \"fortnights\"\n");
    let output = run_xsdur(&home, &["parse", "PT1S"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1000000000\n");
}

#[test]
fn missing_explicit_config_warns() {
    let home = tempdir().unwrap();
    let missing = home.path().join("elsewhere.toml");
    let output = run_xsdur_logging(
        &home,
        &["--config", missing.to_str().unwrap(), "parse", "PT1S"],
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1000000000\n");
    let stderr = stderr(&output);
    assert!(stderr.contains("elsewhere.toml not found; using defaults"), "{stderr}");
}

#[test]
fn invalid_log_filter_warns() {
    let home = tempdir().unwrap();
    write_file(home.path(), "config.toml", "[log]\nfilter = \"xsdur=loud\"\n");
    let output = run_xsdur_logging(&home, &["parse", "PT1S"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1000000000\n");
    let stderr = stderr(&output);
    assert!(stderr.contains("Ignoring log.filter `xsdur=loud`"), "{stderr}");
}
