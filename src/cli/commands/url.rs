use crate::cli::parser::{Cli, Commands};
use crate::db::{format_dsn, format_dsn_masked};
use crate::errors::AppResult;
use crate::loader::{DbLoader, InitOutcome};
use crate::ui::messages::info;

/// Handle the `url` command
pub fn handle(cli: &Cli, loader: &DbLoader) -> AppResult<()> {
    let Commands::Url { show_password } = &cli.command else {
        return Ok(());
    };

    match loader.prepare(cli.group.as_deref())? {
        InitOutcome::Bootstrapped(path) => {
            info(format!(
                "No config file found, template written to {}",
                path.display()
            ));
        }
        InitOutcome::Ready(settings) => {
            let creds = settings.credentials();
            if let Some(group) = &settings.group {
                info(format!("Using setting group '{group}'"));
            }
            let dsn = if *show_password {
                format_dsn(&creds)
            } else {
                format_dsn_masked(&creds)
            };
            println!("{dsn}");
        }
    }

    Ok(())
}
