use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};

/// Command-line interface definition for dbloader
#[derive(Parser, Debug)]
#[command(
    name = "dbloader",
    version = env!("CARGO_PKG_VERSION"),
    about = "Load MySQL credentials from a JSON config file and open a connection pool",
    long_about = None
)]
pub struct Cli {
    /// Config file to read (created with a template if missing)
    #[arg(global = true, long = "config", default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Setting group overriding the default credentials
    #[arg(global = true, long = "group")]
    pub group: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the config file template if it does not exist
    Init,

    /// Inspect the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Print the connection string resolved from the config file
    Url {
        #[arg(long = "show-password", help = "Do not mask the password")]
        show_password: bool,
    },

    /// Open the connection pool and query the server version
    Connect,
}
