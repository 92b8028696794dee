#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn dbl() -> Command {
    let mut cmd = cargo_bin_cmd!("dbloader");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Unique config path inside the system temp dir, removed if present
pub fn temp_config(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_dbloader.json", name));
    fs::remove_file(&path).ok();
    path
}

/// Write `conf` to a fresh temp config file and return its path
pub fn write_config(name: &str, conf: &Value) -> PathBuf {
    let path = temp_config(name);
    fs::write(&path, serde_json::to_string_pretty(conf).expect("serialize")).expect("write config");
    path
}
