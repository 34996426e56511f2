//! CLI argument definitions using clap
//!
//! Commands:
//! - kindstore serve [--config <path>] [--host <host>] [--port <port>] [--log-level <level>]
//! - kindstore config [--config <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// kindstore - schema-less namespaced items over HTTP
#[derive(Parser, Debug)]
#[command(name = "kindstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        overrides: ConfigArgs,
    },

    /// Print the effective configuration as JSON and exit
    Config {
        #[command(flatten)]
        overrides: ConfigArgs,
    },
}

/// Configuration sources shared by all commands
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long)]
    pub port: Option<u16>,

    /// Minimum log severity (TRACE, INFO, WARN, ERROR, FATAL)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
