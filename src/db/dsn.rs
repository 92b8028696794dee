//! Connection string formatting and host/port parsing.

use crate::config::Credentials;
use crate::errors::{AppError, AppResult};

/// Query parameters appended to every connection string.
pub const DSN_PARAMS: &str = "charset=utf8&parseTime=True&loc=Local";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3306;

const MASK: &str = "****";

/// `user:password@(host)/dbname?charset=utf8&parseTime=True&loc=Local`
pub fn format_dsn(creds: &Credentials) -> String {
    format!(
        "{}:{}@({})/{}?{}",
        creds.user, creds.passwd, creds.host, creds.db_name, DSN_PARAMS
    )
}

/// Same as `format_dsn`, with a non-empty password replaced by `****`.
pub fn format_dsn_masked(creds: &Credentials) -> String {
    let passwd = if creds.passwd.is_empty() { "" } else { MASK };
    format!(
        "{}:{}@({})/{}?{}",
        creds.user, passwd, creds.host, creds.db_name, DSN_PARAMS
    )
}

/// Split `host`, `host:port`, `[v6]` or `[v6]:port`.
///
/// An empty host means `127.0.0.1:3306`.
pub fn split_host_port(host: &str) -> AppResult<(String, u16)> {
    let host = host.trim();
    if host.is_empty() {
        return Ok((DEFAULT_HOST.to_string(), DEFAULT_PORT));
    }

    if let Some(rest) = host.strip_prefix('[') {
        let (addr, tail) = rest
            .split_once(']')
            .ok_or_else(|| AppError::invalid("host", format!("unclosed '[' in '{host}'")))?;
        let port = match tail {
            "" => DEFAULT_PORT,
            t => match t.strip_prefix(':') {
                Some(p) => parse_port(p, host)?,
                None => {
                    return Err(AppError::invalid(
                        "host",
                        format!("unexpected '{t}' after address in '{host}'"),
                    ));
                }
            },
        };
        return Ok((addr.to_string(), port));
    }

    match host.split_once(':') {
        // more than one colon without brackets: bare IPv6 address
        Some((_, rest)) if rest.contains(':') => Ok((host.to_string(), DEFAULT_PORT)),
        Some((addr, port)) => Ok((addr.to_string(), parse_port(port, host)?)),
        None => Ok((host.to_string(), DEFAULT_PORT)),
    }
}

fn parse_port(port: &str, host: &str) -> AppResult<u16> {
    port.parse::<u16>()
        .map_err(|_| AppError::invalid("host", format!("invalid port '{port}' in '{host}'")))
}
