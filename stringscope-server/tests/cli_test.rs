use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_help_lists_flags() -> Result<()> {
    let mut cmd = Command::cargo_bin("stringscope-server")?;
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--log-level"));
    Ok(())
}

#[test]
fn test_missing_config_file_fails() -> Result<()> {
    let dir = tempdir()?;
    let missing = dir.path().join("missing.yaml");

    let mut cmd = Command::cargo_bin("stringscope-server")?;
    cmd.arg("--config").arg(&missing);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
    Ok(())
}

#[test]
fn test_invalid_config_file_fails() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, "port: \"eighty\"\n")?;

    let mut cmd = Command::cargo_bin("stringscope-server")?;
    cmd.arg("--config").arg(&config_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
    Ok(())
}

#[test]
fn test_invalid_port_flag_fails() -> Result<()> {
    let mut cmd = Command::cargo_bin("stringscope-server")?;
    cmd.args(["--port", "not-a-port"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
    Ok(())
}
