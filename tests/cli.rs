//! Binary smoke tests
//!
//! Runs the built `dispatchr` executable in a scratch directory with the
//! config and data homes pointed into it.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run(home: &Path, data_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dispatchr"))
        .args(args)
        .current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", data_home)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run dispatchr")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_answer_exits_zero() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &home.path().join("data"), &["What", "is", "2", "+", "2?"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "4");
    assert!(home.path().join("data/dispatchr/logs/dispatchr.log").exists());
}

#[test]
fn test_unresolvable_query_still_exits_zero() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &home.path().join("data"), &["Convert 10 xyz to abc"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "I encountered an error while processing your request.");
}

#[test]
fn test_missing_query_exits_nonzero() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &home.path().join("data"), &[]);
    assert!(!output.status.success());
}

#[test]
fn test_unwritable_log_dir_still_answers() {
    let home = TempDir::new().unwrap();
    let blocker = home.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    let output = run(home.path(), &blocker, &["What is 2 + 2?"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "4");
    assert!(String::from_utf8_lossy(&output.stderr).contains("logging disabled"));
}

#[test]
fn test_broken_fallback_config_is_reported() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("dispatchr.yml"), "knowledge_base: [unclosed").unwrap();

    let output = run(home.path(), &home.path().join("data"), &["What is 2 + 2?"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "4");
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load config from dispatchr.yml"));

    let log = fs::read_to_string(home.path().join("data/dispatchr/logs/dispatchr.log")).unwrap();
    assert!(log.contains("No config file found, using defaults"));
}

#[test]
fn test_explicit_config_source_is_logged() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.yml");
    fs::write(&config, format!("log_dir: {}\n", home.path().join("logs").display())).unwrap();

    let output = run(home.path(), &home.path().join("data"), &["-c", "custom.yml", "What is 2 + 2?"]);
    assert!(output.status.success());

    let log = fs::read_to_string(home.path().join("logs/dispatchr.log")).unwrap();
    assert!(log.contains("Loaded config from: custom.yml"));
}

#[test]
fn test_learn_reports_saved_path() {
    let home = TempDir::new().unwrap();
    let output = run(
        home.path(),
        &home.path().join("data"),
        &["--learn", "Grace Hopper", "Grace Hopper pioneered compilers."],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("Grace Hopper (data/kb.json)"));
    assert!(home.path().join("data/kb.json").exists());
}
