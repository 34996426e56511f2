//! CLI command implementations
//!
//! `serve` loads configuration, composes the service chain
//! `Observe(AutoFields(NamespaceStore))` and runs the HTTP server on a
//! multi-threaded tokio runtime. `config` prints the effective
//! configuration.

use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::core::{AutoFields, NamespaceStore, Observe, Service};
use crate::http_server::config::API_ADDRESS_ENV;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event, Logger, MetricsRegistry, Severity};

use super::args::{Command, ConfigArgs};
use super::errors::{CliError, CliResult};

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { overrides } => serve(&overrides),
        Command::Config { overrides } => print_config(&overrides),
    }
}

/// Read a JSON configuration file
pub fn load_config_file(path: &Path) -> CliResult<HttpServerConfig> {
    let content = fs::read_to_string(path).map_err(|source| CliError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| CliError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve configuration from all sources
///
/// Priority, lowest first: defaults, config file, `API_ADDRESS`, flags.
pub fn load_config(args: &ConfigArgs, api_address: Option<&str>) -> CliResult<HttpServerConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => HttpServerConfig::default(),
    };

    if let Some(address) = api_address.filter(|a| !a.is_empty()) {
        config
            .apply_address(address)
            .map_err(|e| CliError::Config(format!("{}: {}", API_ADDRESS_ENV, e)))?;
    }

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }

    config.validate().map_err(CliError::Config)?;
    Ok(config)
}

fn load_config_from_env(args: &ConfigArgs) -> CliResult<HttpServerConfig> {
    let api_address = env::var(API_ADDRESS_ENV).ok();
    load_config(args, api_address.as_deref())
}

/// Build the service chain served over HTTP
pub fn build_service(metrics: Arc<MetricsRegistry>) -> Arc<dyn Service> {
    Arc::new(Observe::new(AutoFields::new(NamespaceStore::new()), metrics))
}

/// Start the HTTP server and block until it stops
pub fn serve(args: &ConfigArgs) -> CliResult<()> {
    let config = load_config_from_env(args)?;

    let level: Severity = config.log_level.parse().map_err(CliError::Config)?;
    Logger::set_min_severity(level);

    log_event(Event::BootStart);
    let address = config.socket_addr();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("address", &address), ("log_level", level.as_str())],
    );

    let metrics = Arc::new(MetricsRegistry::new());
    let service = build_service(metrics.clone());
    let server = HttpServer::new(config, service, metrics).map_err(CliError::Config)?;

    let rt = tokio::runtime::Runtime::new().map_err(CliError::Runtime)?;
    rt.block_on(server.start()).map_err(CliError::Serve)
}

/// Print the effective configuration
pub fn print_config(args: &ConfigArgs) -> CliResult<()> {
    let config = load_config_from_env(args)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
