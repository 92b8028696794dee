use crate::cli::parser::{Cli, Commands};
use crate::config;
use crate::errors::{AppError, AppResult};
use crate::loader::DbLoader;
use crate::ui::messages::{header, success, warning};
use std::fs;
use std::io;

/// Handle the `config` subcommand
pub fn handle(cli: &Cli, loader: &DbLoader) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
    } = &cli.command
    else {
        return Ok(());
    };

    let path = loader.config_path();

    // ---- PRINT CONFIG ----
    if *print_config {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AppError::ConfigNotFound(path.to_path_buf()),
            _ => AppError::Io(e),
        })?;
        header(format!("Configuration {}", path.display()));
        println!("{content}");
    }

    // ---- CHECK CONFIG ----
    if *check {
        let conf = config::load_config(path)?;
        let report = config::check(&conf);

        for field in &report.missing {
            warning(format!("Missing or empty field: {field}"));
        }
        for field in &report.invalid {
            warning(format!("Field has the wrong type: {field}"));
        }
        for (group, missing) in &report.groups {
            if missing.is_empty() {
                success(format!("Group '{group}' is complete"));
            } else {
                warning(format!(
                    "Group '{group}' is missing: {}",
                    missing.join(", ")
                ));
            }
        }

        if report.is_complete() {
            success("Configuration is complete");
        }
    }

    Ok(())
}
