use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

fn write_session(home: &std::path::Path) {
    let state = serde_json::json!({
        "access_token": "AAA",
        "refresh_token": "BBB",
        "user": {
            "id": 1,
            "email": "doctor@test.com",
            "role": "doctor",
        },
    });
    fs::write(
        home.join("session.json"),
        serde_json::to_string_pretty(&state).unwrap(),
    )
    .unwrap();
}

#[test]
fn test_whoami_without_session() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("mediq")
        .env("MEDIQ_HOME", dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn test_whoami_with_session() {
    let dir = tempdir().unwrap();
    write_session(dir.path());

    cargo_bin_cmd!("mediq")
        .env("MEDIQ_HOME", dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("doctor@test.com"))
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn test_logout_clears_session_file() {
    let dir = tempdir().unwrap();
    write_session(dir.path());
    let session_path = dir.path().join("session.json");
    assert!(session_path.exists());

    cargo_bin_cmd!("mediq")
        .env("MEDIQ_HOME", dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    assert!(!session_path.exists());
}

#[test]
fn test_logout_without_session() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("mediq")
        .env("MEDIQ_HOME", dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active session."));
}

#[test]
fn test_config_path_respects_home() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("mediq")
        .env("MEDIQ_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    assert!(!config_path.exists());

    cargo_bin_cmd!("mediq")
        .env("MEDIQ_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());
    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("api_base_url"));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "# existing config").unwrap();

    cargo_bin_cmd!("mediq")
        .env("MEDIQ_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
