//! End-to-end tests for the parcel-tracker binary

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tracker(dir: &Path) -> Result<Command, assert_cmd::cargo::CargoError> {
    let mut cmd = Command::cargo_bin("parcel-tracker")?;
    cmd.current_dir(dir)
        .env_remove("PARCEL_TRACKER_DB")
        .env_remove("PARCEL_TRACKER_LOG")
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(dir.join("tracker.db"));
    Ok(cmd)
}

#[test]
fn demo_prints_the_whole_walkthrough() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    let output = tracker(dir.path())?.arg("demo").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    assert_eq!(stdout.matches("Parcels of client 1:").count(), 3);
    assert!(stdout.contains("New parcel #1 to address Pskov"));
    assert!(stdout.contains("Parcel #1 has a new status: sent"));
    assert!(stdout.contains("New parcel #2"));
    assert!(!stdout.contains("Parcel #2 to address"));
    Ok(())
}

#[test]
fn parcels_persist_between_runs() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    tracker(dir.path())?
        .args(["register", "--client", "7", "--address", "Elm St. 4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New parcel #1 to address Elm St. 4 from client 7"));

    tracker(dir.path())?
        .args(["advance", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parcel #1 has a new status: sent"));

    tracker(dir.path())?
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("status sent"));
    Ok(())
}

#[test]
fn show_missing_parcel_exits_with_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    tracker(dir.path())?
        .args(["show", "99"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Parcel 99 not found"));
    Ok(())
}

#[test]
fn guarded_delete_reports_unchanged_in_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    tracker(dir.path())?
        .args(["--json", "register", "--client", "1", "--address", "X"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"event\":\"registered\""));
    tracker(dir.path())?.args(["advance", "1"]).assert().success();

    tracker(dir.path())?
        .args(["--json", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcome\":\"unchanged\""));

    tracker(dir.path())?
        .args(["list", "--client", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parcel #1 to address X"));
    Ok(())
}

#[test]
fn in_memory_mode_leaves_no_database() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    tracker(dir.path())?
        .args(["--in-memory", "list", "--client", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parcels of client 5:"));

    assert!(!dir.path().join("tracker.db").exists());
    Ok(())
}

#[test]
fn malformed_config_exits_with_config_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "database = [")?;

    tracker(dir.path())?
        .arg("--config")
        .arg(&config)
        .args(["list", "--client", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}
