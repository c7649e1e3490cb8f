use assert_cmd::Command;
use predicates::prelude::*;

fn blocknotes() -> Command {
    Command::cargo_bin("blocknotes").unwrap()
}

#[test]
fn test_help_lists_options() {
    blocknotes()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--data-dir"))
        .stdout(predicate::str::contains("--bind"));
}

#[test]
fn test_version_starts_with_package_version() {
    blocknotes()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "blocknotes {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_config_shows_defaults_and_overrides() {
    let temp_dir = tempfile::tempdir().unwrap();

    blocknotes()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--bind")
        .arg("127.0.0.1:4567")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("bind = 127.0.0.1:4567"))
        .stdout(predicate::str::contains("list_limit = 20"))
        .stdout(predicate::str::contains("save_debounce_ms = 1000"));
}

#[test]
fn test_config_write_saves_effective_config() {
    let temp_dir = tempfile::tempdir().unwrap();

    blocknotes()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--bind")
        .arg("127.0.0.1:4567")
        .arg("config")
        .arg("--write")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved"));

    let saved = std::fs::read_to_string(temp_dir.path().join("config.json")).unwrap();
    assert!(saved.contains("127.0.0.1:4567"));

    // The saved file is picked up without the flag
    blocknotes()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("bind = 127.0.0.1:4567"));
}

#[test]
fn test_config_reads_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("config.json"), r#"{"list_limit": 7}"#).unwrap();

    blocknotes()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("list_limit = 7"));
}

#[test]
fn test_malformed_config_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("config.json"), "{ nope").unwrap();

    blocknotes()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Serialization error"));
}

#[test]
fn test_unbindable_address_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    blocknotes()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--bind")
        .arg("not-an-address")
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
