use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::json;
use std::fs;

mod common;
use common::{dbl, temp_config, write_config};

#[test]
fn test_init_creates_then_keeps_config() {
    let path = temp_config("cli_init");
    let path_str = path.to_string_lossy().to_string();

    dbl()
        .args(["--config", &path_str, "init"])
        .assert()
        .success()
        .stdout(contains("Config file created"));

    assert!(path.is_file());
    fs::write(&path, r#"{"defaultUser": "kept"}"#).unwrap();

    dbl()
        .args(["--config", &path_str, "init"])
        .assert()
        .success()
        .stdout(contains("already exists"));

    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"defaultUser": "kept"}"#);
}

fn sample(name: &str) -> String {
    let path = write_config(
        name,
        &json!({
            "defaultUser": "user",
            "defaultPasswd": "pass",
            "defaultHost": "host",
            "defaultDBName": "dbname",
            "setting": {
                "cloud": { "User": "u2", "Passwd": "p2", "Host": "h2", "DBName": "d2" }
            }
        }),
    );
    path.to_string_lossy().to_string()
}

#[test]
fn test_url_masks_password() {
    let path = sample("cli_url_masked");

    dbl()
        .args(["--config", &path, "url"])
        .assert()
        .success()
        .stdout(contains(
            "user:****@(host)/dbname?charset=utf8&parseTime=True&loc=Local",
        ))
        .stdout(contains("pass@").not());

    dbl()
        .args(["--config", &path, "url", "--show-password"])
        .assert()
        .success()
        .stdout(contains(
            "user:pass@(host)/dbname?charset=utf8&parseTime=True&loc=Local",
        ));
}

#[test]
fn test_url_with_group() {
    let path = sample("cli_url_group");

    dbl()
        .args(["--config", &path, "--group", "cloud", "url", "--show-password"])
        .assert()
        .success()
        .stdout(contains("Using setting group 'cloud'"))
        .stdout(contains("u2:p2@(h2)/d2?charset=utf8&parseTime=True&loc=Local"));

    dbl()
        .args(["--config", &path, "--group", "missing", "url", "--show-password"])
        .assert()
        .success()
        .stdout(contains("user:pass@(host)/dbname"));
}

#[test]
fn test_url_without_config_bootstraps() {
    let path = temp_config("cli_url_bootstrap");
    let path_str = path.to_string_lossy().to_string();

    dbl()
        .args(["--config", &path_str, "url"])
        .assert()
        .success()
        .stdout(contains("template written"));

    assert!(path.is_file());
}

#[test]
fn test_config_check_and_print() {
    let path = temp_config("cli_check");
    let path_str = path.to_string_lossy().to_string();

    dbl().args(["--config", &path_str, "init"]).assert().success();

    dbl()
        .args(["--config", &path_str, "config", "--check"])
        .assert()
        .success()
        .stdout(contains("Missing or empty field: defaultUser"))
        .stdout(contains(
            "Group 'cloudSetting' is missing: User, Passwd, Host, DBName",
        ));

    dbl()
        .args(["--config", &path_str, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("\"defaultDBName\""));

    let complete = sample("cli_check_complete");
    dbl()
        .args(["--config", &complete, "config", "--check"])
        .assert()
        .success()
        .stdout(contains("Configuration is complete"));
}

#[test]
fn test_malformed_config_fails() {
    let path = temp_config("cli_malformed");
    fs::write(&path, "not json").unwrap();
    let path_str = path.to_string_lossy().to_string();

    dbl()
        .args(["--config", &path_str, "url"])
        .assert()
        .failure()
        .stderr(contains("Malformed configuration file"));
}

#[test]
fn test_connect_unreachable_fails() {
    let path = write_config(
        "cli_connect",
        &json!({
            "defaultUser": "app",
            "defaultPasswd": "secret",
            "defaultHost": "127.0.0.1:1",
            "defaultDBName": "shop"
        }),
    );
    let path_str = path.to_string_lossy().to_string();

    dbl()
        .args(["--config", &path_str, "connect"])
        .assert()
        .failure()
        .stderr(contains("Database connection failed"));
}
