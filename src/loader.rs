//! Entry point for callers: find the config file, bootstrap it if missing,
//! otherwise resolve settings and open the pool.

use crate::config::{self, DEFAULT_CONFIG_FILE, Settings};
use crate::db::{DbHandle, PoolSettings};
use crate::errors::AppResult;
use std::path::{Path, PathBuf};

/// What `DbLoader::prepare` found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// No config existed; the template was written to this path.
    Bootstrapped(PathBuf),
    /// Config was read and projected.
    Ready(Settings),
}

#[derive(Debug, Clone)]
pub struct DbLoader {
    config_path: PathBuf,
    pool: PoolSettings,
}

impl Default for DbLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DbLoader {
    pub fn new() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            pool: PoolSettings::default(),
        }
    }

    pub fn with_config_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn with_pool_settings(mut self, pool: PoolSettings) -> Self {
        self.pool = pool;
        self
    }

    /// Change the config file read by later `init` calls.
    pub fn set_config_file_name<P: Into<PathBuf>>(&mut self, name: P) {
        self.config_path = name.into();
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn pool_settings(&self) -> &PoolSettings {
        &self.pool
    }

    /// Bootstrap or read the config file, without touching the database.
    pub fn prepare(&self, group: Option<&str>) -> AppResult<InitOutcome> {
        let path = &self.config_path;

        if !config::file_exists(path)? {
            config::init_file(path)?;
            log::info!("no config file, wrote template to {}", path.display());
            return Ok(InitOutcome::Bootstrapped(path.clone()));
        }

        let conf = config::load_config(path)?;
        let settings = Settings::project(&conf, group)?;
        Ok(InitOutcome::Ready(settings))
    }

    /// Full initialization.
    ///
    /// Returns `Ok(None)` when the config file had to be created; the caller
    /// fills it in and calls again.
    pub fn init(&self, group: Option<&str>) -> AppResult<Option<DbHandle>> {
        match self.prepare(group)? {
            InitOutcome::Bootstrapped(_) => Ok(None),
            InitOutcome::Ready(settings) => {
                let handle = DbHandle::open(&settings.credentials(), &self.pool)?;
                Ok(Some(handle))
            }
        }
    }
}
