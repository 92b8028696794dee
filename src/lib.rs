//! dbloader library root.
//!
//! Reads MySQL credentials from a JSON file (writing a template when the file
//! is missing) and opens a connection pool:
//!
//! ```rust,no_run
//! use dbloader::DbLoader;
//!
//! let loader = DbLoader::new().with_config_file("database.json");
//! match loader.init(Some("cloudSetting"))? {
//!     Some(db) => db.ping()?,
//!     None => println!("template written, fill it in"),
//! }
//! # Ok::<(), dbloader::AppError>(())
//! ```

pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod loader;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};

pub use config::{Credentials, Settings};
pub use db::{DbHandle, PoolSettings};
pub use errors::{AppError, AppResult};
pub use loader::{DbLoader, InitOutcome};

/// Central command dispatcher
pub fn dispatch(cli: &Cli) -> AppResult<()> {
    let loader = DbLoader::new().with_config_file(config::resolve_path(&cli.config));

    match &cli.command {
        Commands::Init => cli::commands::init::handle(&loader),
        Commands::Config { .. } => cli::commands::config::handle(cli, &loader),
        Commands::Url { .. } => cli::commands::url::handle(cli, &loader),
        Commands::Connect => cli::commands::connect::handle(cli, &loader),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    dispatch(&cli)
}
