//! MySQL connection pool wrapper.

use crate::config::Credentials;
use crate::db::dsn::{format_dsn_masked, split_host_port};
use crate::errors::{AppError, AppResult};
use mysql::prelude::{FromRow, Queryable};
use mysql::{Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts, PooledConn};
use std::fmt;

pub const MAX_OPEN_CONNS: usize = 100;
pub const MAX_IDLE_CONNS: usize = 20;

/// Connections opened by `Pool::new`. One is enough to prove the server is
/// reachable.
pub const MIN_POOL_CONNS: usize = 1;

/// Pool limits and query logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_open: usize,
    /// Upper bound on unused connections. The `mysql` pool has no idle cap, so
    /// this is validated against `max_open` but not enforced by the driver.
    pub max_idle: usize,
    pub log_queries: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_open: MAX_OPEN_CONNS,
            max_idle: MAX_IDLE_CONNS,
            log_queries: true,
        }
    }
}

impl PoolSettings {
    fn constraints(&self) -> AppResult<PoolConstraints> {
        if self.max_idle > self.max_open {
            return Err(AppError::Config(format!(
                "max idle connections ({}) exceed max open connections ({})",
                self.max_idle, self.max_open
            )));
        }

        if self.max_open == 0 {
            return Err(AppError::Config(
                "max open connections must be at least 1".to_string(),
            ));
        }

        PoolConstraints::new(MIN_POOL_CONNS, self.max_open).ok_or_else(|| {
            AppError::Config(format!(
                "invalid pool limits {MIN_POOL_CONNS}..{}",
                self.max_open
            ))
        })
    }
}

/// Pooled database handle handed back by the loader.
#[derive(Clone)]
pub struct DbHandle {
    pool: Pool,
    dsn: String,
    log_queries: bool,
}

impl fmt::Debug for DbHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbHandle")
            .field("dsn", &self.dsn)
            .field("log_queries", &self.log_queries)
            .finish()
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

/// Translate credentials and limits into driver options.
pub fn build_opts(creds: &Credentials, settings: &PoolSettings) -> AppResult<Opts> {
    let (host, port) = split_host_port(&creds.host)?;
    let pool_opts = PoolOpts::default().with_constraints(settings.constraints()?);

    let builder = OptsBuilder::new()
        .ip_or_hostname(Some(host))
        .tcp_port(port)
        .user(Some(creds.user.as_str()))
        .pass(Some(creds.passwd.as_str()))
        .db_name(non_empty(&creds.db_name))
        .init(vec!["SET NAMES utf8"])
        .pool_opts(pool_opts);

    Ok(Opts::from(builder))
}

impl DbHandle {
    /// Open a pool for `creds`. Connection errors are returned, never fatal.
    pub fn open(creds: &Credentials, settings: &PoolSettings) -> AppResult<Self> {
        let opts = build_opts(creds, settings)?;
        let dsn = format_dsn_masked(creds);

        log::info!(
            "opening pool {dsn} (max open {}, max idle {})",
            settings.max_open,
            settings.max_idle
        );
        let pool = Pool::new(opts).map_err(|e| {
            log::error!("connection to {dsn} failed: {e}");
            AppError::ConnectionFailed(e)
        })?;

        Ok(Self {
            pool,
            dsn,
            log_queries: settings.log_queries,
        })
    }

    /// Connection string with the password masked.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    pub fn log_mode(&self) -> bool {
        self.log_queries
    }

    /// Toggle logging of statements run through `query_drop`, `query_first`,
    /// `ping` and `server_version`. Statements sent on a connection taken
    /// with `get_conn` are not logged.
    pub fn set_log_mode(&mut self, enabled: bool) {
        self.log_queries = enabled;
    }

    /// Take a raw connection from the pool. Bypasses statement logging.
    pub fn get_conn(&self) -> AppResult<PooledConn> {
        self.pool.get_conn().map_err(AppError::ConnectionFailed)
    }

    fn with_conn<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut PooledConn) -> AppResult<T>,
    {
        let mut conn = self.get_conn()?;
        func(&mut conn)
    }

    fn trace(&self, sql: &str) {
        if self.log_queries {
            log::info!(target: "dbloader::sql", "{sql}");
        }
    }

    pub fn query_drop(&self, sql: &str) -> AppResult<()> {
        self.trace(sql);
        self.with_conn(|conn| Ok(conn.query_drop(sql)?))
    }

    pub fn query_first<T: FromRow>(&self, sql: &str) -> AppResult<Option<T>> {
        self.trace(sql);
        self.with_conn(|conn| Ok(conn.query_first(sql)?))
    }

    /// Round-trip a trivial statement.
    pub fn ping(&self) -> AppResult<()> {
        self.query_drop("SELECT 1")
    }

    pub fn server_version(&self) -> AppResult<Option<String>> {
        self.query_first::<String>("SELECT VERSION()")
    }
}
