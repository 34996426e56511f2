//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// A configuration value or override is unusable
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read config {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config JSON in {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The tokio runtime could not be created
    #[error("failed to create tokio runtime: {0}")]
    Runtime(#[source] io::Error),

    /// Binding or serving failed
    #[error("HTTP server failed: {0}")]
    Serve(#[source] io::Error),

    /// Rendering command output failed
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
