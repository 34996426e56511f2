//! CLI module
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP item service
//! - config: Print the effective configuration

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ConfigArgs};
pub use commands::{build_service, load_config, load_config_file, print_config, run, run_command, serve};
pub use errors::{CliError, CliResult};
