//! Projection of the raw config tree into connection settings.

use super::{
    ConfigFile, FLAT_KEYS, GROUP_DBNAME, GROUP_HOST, GROUP_PASSWD, GROUP_USER, KEY_SETTING,
};
use crate::errors::{AppError, AppResult};
use serde_json::Value;
use std::collections::BTreeMap;

/// The four fields needed to reach a database.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub passwd: String,
    pub host: String,
    pub db_name: String,
}

/// Flat defaults plus the overlay of the requested group (if any).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Settings {
    pub defaults: Credentials,
    /// Entries of `setting.<group>`. Empty unless the group was requested and found.
    pub overlay: BTreeMap<String, String>,
    /// Group the overlay was taken from.
    pub group: Option<String>,
}

impl Settings {
    /// Build settings from a decoded config tree.
    ///
    /// A non-object root yields empty settings. Missing or null flat fields are
    /// empty strings; fields of another type are rejected. A requested group
    /// that cannot be found is logged and ignored.
    pub fn project(conf: &Value, group: Option<&str>) -> AppResult<Self> {
        if !conf.is_object() {
            log::warn!("config root is not a JSON object, using empty settings");
            return Ok(Self::default());
        }

        for key in FLAT_KEYS {
            match conf.get(key) {
                None | Some(Value::Null) | Some(Value::String(_)) => {}
                Some(_) => return Err(AppError::invalid(key, "expected a string")),
            }
        }

        let file: ConfigFile = serde_json::from_value(conf.clone())
            .map_err(|e| AppError::invalid("config", e.to_string()))?;

        let mut settings = Settings {
            defaults: Credentials {
                user: file.default_user,
                passwd: file.default_passwd,
                host: file.default_host,
                db_name: file.default_db_name,
            },
            ..Self::default()
        };

        if let Some(name) = group {
            match lookup_group(&file.setting, name) {
                Ok(overlay) => {
                    log::debug!("using setting group '{name}'");
                    settings.overlay = overlay;
                    settings.group = Some(name.to_string());
                }
                Err(AppError::GroupNotFound(_)) => {
                    log::warn!("{}", AppError::GroupNotFound(name.to_string()));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(settings)
    }

    /// Credentials used to connect.
    ///
    /// A non-empty overlay replaces the defaults entirely; overlay keys it
    /// lacks come out as empty strings.
    pub fn credentials(&self) -> Credentials {
        if self.overlay.is_empty() {
            return self.defaults.clone();
        }

        let get = |key: &str| self.overlay.get(key).cloned().unwrap_or_default();
        Credentials {
            user: get(GROUP_USER),
            passwd: get(GROUP_PASSWD),
            host: get(GROUP_HOST),
            db_name: get(GROUP_DBNAME),
        }
    }
}

/// Find `name` under the `setting` section and copy its string entries.
///
/// A missing or null section, or a missing group, is `GroupNotFound`.
pub fn lookup_group(setting: &Value, name: &str) -> AppResult<BTreeMap<String, String>> {
    let groups = match setting {
        Value::Null => return Err(AppError::GroupNotFound(name.to_string())),
        Value::Object(groups) => groups,
        _ => return Err(AppError::invalid(KEY_SETTING, "expected an object")),
    };

    match groups.get(name) {
        None | Some(Value::Null) => Err(AppError::GroupNotFound(name.to_string())),
        Some(Value::Object(entries)) => entries
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => Ok((k.clone(), s.clone())),
                Value::Null => Ok((k.clone(), String::new())),
                _ => Err(AppError::invalid(
                    format!("{KEY_SETTING}.{name}.{k}"),
                    "expected a string",
                )),
            })
            .collect(),
        Some(_) => Err(AppError::invalid(
            format!("{KEY_SETTING}.{name}"),
            "expected an object",
        )),
    }
}
