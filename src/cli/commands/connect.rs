use crate::cli::parser::Cli;
use crate::errors::AppResult;
use crate::loader::DbLoader;
use crate::ui::messages::{info, success};

/// Handle the `connect` command
///
/// Runs the full initialization: bootstrap when the config is missing,
/// otherwise open the pool and ask the server for its version.
pub fn handle(cli: &Cli, loader: &DbLoader) -> AppResult<()> {
    let Some(handle) = loader.init(cli.group.as_deref())? else {
        info(format!(
            "No config file, template written to {}. Fill it in and run again.",
            loader.config_path().display()
        ));
        return Ok(());
    };

    info(format!("Pool opened: {}", handle.dsn()));
    let version = handle
        .server_version()?
        .unwrap_or_else(|| "unknown".to_string());
    success(format!("Connected, server version {version}"));
    Ok(())
}
