use dbloader::config::Credentials;
use dbloader::db::dsn::split_host_port;
use dbloader::db::pool::build_opts;
use dbloader::db::{DbHandle, PoolSettings, format_dsn_masked};
use dbloader::{AppError, DbLoader};
use serde_json::json;

mod common;
use common::write_config;

fn creds(host: &str) -> Credentials {
    Credentials {
        user: "app".to_string(),
        passwd: "secret".to_string(),
        host: host.to_string(),
        db_name: "shop".to_string(),
    }
}

#[test]
fn test_split_host_port() {
    assert_eq!(split_host_port("db.local").unwrap(), ("db.local".to_string(), 3306));
    assert_eq!(split_host_port("db.local:3307").unwrap(), ("db.local".to_string(), 3307));
    assert_eq!(split_host_port("").unwrap(), ("127.0.0.1".to_string(), 3306));
    assert_eq!(split_host_port("[::1]:3310").unwrap(), ("::1".to_string(), 3310));
    assert_eq!(split_host_port("[::1]").unwrap(), ("::1".to_string(), 3306));
    assert_eq!(split_host_port("fe80::1").unwrap(), ("fe80::1".to_string(), 3306));

    assert!(matches!(
        split_host_port("db.local:abc"),
        Err(AppError::ConfigInvalid { .. })
    ));
    assert!(matches!(
        split_host_port("[::1"),
        Err(AppError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_masked_dsn() {
    assert_eq!(
        format_dsn_masked(&creds("db:3306")),
        "app:****@(db:3306)/shop?charset=utf8&parseTime=True&loc=Local"
    );

    let mut no_pass = creds("db");
    no_pass.passwd.clear();
    assert_eq!(
        format_dsn_masked(&no_pass),
        "app:@(db)/shop?charset=utf8&parseTime=True&loc=Local"
    );
}

#[test]
fn test_default_pool_settings() {
    let settings = PoolSettings::default();
    assert_eq!(settings.max_open, 100);
    assert_eq!(settings.max_idle, 20);
    assert!(settings.log_queries);
}

#[test]
fn test_build_opts() {
    let opts = build_opts(&creds("db.local:3307"), &PoolSettings::default()).unwrap();
    assert_eq!(opts.get_tcp_port(), 3307);
    assert_eq!(opts.get_user(), Some("app"));
    assert_eq!(opts.get_pass(), Some("secret"));
    assert_eq!(opts.get_db_name(), Some("shop"));

    let mut empty_db = creds("db.local");
    empty_db.db_name.clear();
    let opts = build_opts(&empty_db, &PoolSettings::default()).unwrap();
    assert_eq!(opts.get_db_name(), None);
}

#[test]
fn test_pool_opens_one_connection_up_front() {
    let settings = PoolSettings::default();
    let opts = build_opts(&creds("db.local"), &settings).unwrap();
    let constraints = opts.get_pool_opts().constraints();

    // the idle limit must not become the number of eager connections
    assert_ne!(constraints.min(), settings.max_idle);
    assert_eq!(constraints.min(), 1);
    assert_eq!(constraints.max(), 100);
}

#[test]
fn test_zero_max_open_is_rejected() {
    let settings = PoolSettings {
        max_open: 0,
        max_idle: 0,
        log_queries: true,
    };
    assert!(matches!(
        build_opts(&creds("db.local"), &settings),
        Err(AppError::Config(_))
    ));
}

#[test]
fn test_statement_errors_are_not_connection_failures() {
    let err = AppError::from(mysql::Error::MySqlError(mysql::MySqlError {
        state: "42000".to_string(),
        message: "You have an error in your SQL syntax".to_string(),
        code: 1064,
    }));

    assert!(matches!(err, AppError::Db(_)));
    assert!(err.to_string().starts_with("Database error:"));
}

#[test]
fn test_idle_above_open_is_rejected() {
    let settings = PoolSettings {
        max_open: 5,
        max_idle: 10,
        log_queries: false,
    };
    assert!(matches!(
        DbHandle::open(&creds("db.local"), &settings),
        Err(AppError::Config(_))
    ));
}

#[test]
fn test_invalid_port_fails_before_connecting() {
    let path = write_config(
        "invalid_port",
        &json!({
            "defaultUser": "app",
            "defaultPasswd": "secret",
            "defaultHost": "db.local:notaport",
            "defaultDBName": "shop"
        }),
    );

    let err = DbLoader::new().with_config_file(&path).init(None).unwrap_err();
    assert!(matches!(err, AppError::ConfigInvalid { .. }));
}

#[test]
fn test_unreachable_server_is_connection_failed() {
    // nothing listens on port 1
    let path = write_config(
        "unreachable",
        &json!({
            "defaultUser": "app",
            "defaultPasswd": "secret",
            "defaultHost": "127.0.0.1:1",
            "defaultDBName": "shop"
        }),
    );

    let result = DbLoader::new()
        .with_config_file(&path)
        .init(None)
        .and_then(|handle| match handle {
            Some(db) => db.ping(),
            None => panic!("config file exists, expected a connection attempt"),
        });

    assert!(matches!(result, Err(AppError::ConnectionFailed(_))));
}
