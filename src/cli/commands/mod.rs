pub mod config;
pub mod connect;
pub mod init;
pub mod url;
