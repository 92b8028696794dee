//! Config file handling: presence check, template bootstrap, raw JSON reading
//! and a field check used by `dbloader config --check`.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub mod settings;

pub use settings::{Credentials, Settings};

/// File name used when the caller does not pick one.
pub const DEFAULT_CONFIG_FILE: &str = "database.json";

/// Name of the example group written into a fresh config file.
pub const EXAMPLE_GROUP: &str = "cloudSetting";

pub const KEY_USER: &str = "defaultUser";
pub const KEY_PASSWD: &str = "defaultPasswd";
pub const KEY_HOST: &str = "defaultHost";
pub const KEY_DBNAME: &str = "defaultDBName";
pub const KEY_SETTING: &str = "setting";

pub const FLAT_KEYS: [&str; 4] = [KEY_USER, KEY_PASSWD, KEY_HOST, KEY_DBNAME];

pub const GROUP_USER: &str = "User";
pub const GROUP_PASSWD: &str = "Passwd";
pub const GROUP_HOST: &str = "Host";
pub const GROUP_DBNAME: &str = "DBName";

pub const GROUP_KEYS: [&str; 4] = [GROUP_USER, GROUP_PASSWD, GROUP_HOST, GROUP_DBNAME];

/// On-disk shape of the config file.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(rename = "defaultUser", default, deserialize_with = "nullable_string")]
    pub default_user: String,
    #[serde(rename = "defaultPasswd", default, deserialize_with = "nullable_string")]
    pub default_passwd: String,
    #[serde(rename = "defaultHost", default, deserialize_with = "nullable_string")]
    pub default_host: String,
    #[serde(rename = "defaultDBName", default, deserialize_with = "nullable_string")]
    pub default_db_name: String,
    /// Kept untyped: it is only validated when a group is looked up.
    #[serde(default)]
    pub setting: Value,
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ConfigFile {
    /// Template written when no config file exists: empty flat fields plus one
    /// empty example group.
    pub fn template() -> Self {
        let group: serde_json::Map<String, Value> = GROUP_KEYS
            .iter()
            .map(|k| (k.to_string(), Value::String(String::new())))
            .collect();

        let mut setting = serde_json::Map::new();
        setting.insert(EXAMPLE_GROUP.to_string(), Value::Object(group));

        Self {
            setting: Value::Object(setting),
            ..Self::default()
        }
    }

    /// Serialize with tab indentation.
    pub fn to_pretty_json(&self) -> AppResult<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}

/// True only when `path` exists and is not a directory.
///
/// A missing path is `Ok(false)`. Other stat failures (permissions, broken
/// mounts) are returned so they are not mistaken for a missing file.
pub fn file_exists<P: AsRef<Path>>(path: P) -> AppResult<bool> {
    match fs::metadata(path.as_ref()) {
        Ok(meta) => Ok(!meta.is_dir()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(AppError::Io(e)),
    }
}

/// Write the default template to `path`.
///
/// Fails if the file already exists: a populated config is never overwritten.
pub fn init_file<P: AsRef<Path>>(path: P) -> AppResult<()> {
    let path = path.as_ref();

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }

    let body = ConfigFile::template().to_pretty_json()?;
    create_with(path, |file| {
        file.write_all(&body)?;
        file.sync_all()?;
        Ok(())
    })?;

    log::info!("created default config file {}", path.display());
    Ok(())
}

/// Create `path` (never overwriting) and fill it with `write`.
///
/// A partially written file is removed so the next run bootstraps again.
fn create_with<F>(path: &Path, write: F) -> AppResult<()>
where
    F: FnOnce(&mut File) -> AppResult<()>,
{
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;

    if let Err(e) = write(&mut file) {
        drop(file);
        if let Err(rm) = fs::remove_file(path) {
            log::warn!("could not remove partial config {}: {rm}", path.display());
        }
        return Err(e);
    }
    Ok(())
}

/// Read `path` and decode it as arbitrary JSON.
pub fn load_config<P: AsRef<Path>>(path: P) -> AppResult<Value> {
    let path = path.as_ref();

    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AppError::ConfigNotFound(path.to_path_buf()),
        _ => AppError::Io(e),
    })?;

    serde_json::from_str(&raw).map_err(|source| AppError::ConfigMalformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Result of `check`.
#[derive(Debug, Default, PartialEq)]
pub struct ConfigReport {
    /// Flat keys that are absent or empty.
    pub missing: Vec<String>,
    /// Keys whose value has the wrong JSON type.
    pub invalid: Vec<String>,
    /// Every group under `setting`, with the group keys it lacks.
    pub groups: BTreeMap<String, Vec<String>>,
}

impl ConfigReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
            && self.invalid.is_empty()
            && self.groups.values().all(|m| m.is_empty())
    }
}

/// Inspect a raw config tree for missing or mistyped fields.
pub fn check(conf: &Value) -> ConfigReport {
    let mut report = ConfigReport::default();

    let Some(root) = conf.as_object() else {
        report.invalid.push("<root>".to_string());
        return report;
    };

    for key in FLAT_KEYS {
        match root.get(key) {
            Some(Value::String(s)) if !s.is_empty() => {}
            Some(Value::String(_)) | Some(Value::Null) | None => report.missing.push(key.to_string()),
            Some(_) => report.invalid.push(key.to_string()),
        }
    }

    match root.get(KEY_SETTING) {
        None | Some(Value::Null) => {}
        Some(Value::Object(groups)) => {
            for (name, group) in groups {
                let Some(group) = group.as_object() else {
                    report.invalid.push(format!("{KEY_SETTING}.{name}"));
                    continue;
                };
                let missing = GROUP_KEYS
                    .iter()
                    .filter(|k| !matches!(group.get(**k), Some(Value::String(s)) if !s.is_empty()))
                    .map(|k| k.to_string())
                    .collect();
                report.groups.insert(name.clone(), missing);
            }
        }
        Some(_) => report.invalid.push(KEY_SETTING.to_string()),
    }

    report
}

/// Resolve a user supplied config path (`~/` expanded).
pub fn resolve_path(name: &str) -> PathBuf {
    crate::utils::path::expand_tilde(name)
}
