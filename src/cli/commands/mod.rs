use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod subcommands;

pub use subcommands::{NormalizeCommands, ReportCommands};

/// `cartolink` - locator normalization and usage telemetry for map clients.
#[derive(Parser, Debug)]
#[command(name = "cartolink")]
#[command(version)]
#[command(about = "Normalize map resource locators and report usage telemetry.", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.cartolink/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite a resource locator into its API form
    Normalize {
        #[command(subcommand)]
        command: NormalizeCommands,
    },

    /// Send a telemetry event and wait for delivery
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },

    /// Print the effective configuration
    Config,
}
