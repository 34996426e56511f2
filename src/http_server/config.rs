//! HTTP Server Configuration
//!
//! Host, port, CORS and log level. Values come from defaults, an optional
//! JSON file, the `API_ADDRESS` environment variable and CLI flags, in
//! increasing priority (see `cli::commands::load_config`).

use std::net::SocketAddr;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

/// Environment variable holding `host:port` or `:port`
pub const API_ADDRESS_ENV: &str = "API_ADDRESS";

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Minimum log severity (default: "INFO")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "INFO".to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl HttpServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Override host and port from an `API_ADDRESS` style value
    ///
    /// Accepts `host:port` or `:port`; the latter keeps the current host.
    pub fn apply_address(&mut self, address: &str) -> Result<(), String> {
        let (host, port) = address
            .rsplit_once(':')
            .ok_or_else(|| format!("address '{}' has no port", address))?;

        let port: u16 = port
            .parse()
            .map_err(|_| format!("address '{}' has an invalid port", address))?;

        if !host.is_empty() {
            self.host = host.to_string();
        }
        self.port = port;
        Ok(())
    }

    /// Parse the configured CORS origins
    ///
    /// Each origin must be an `http://` or `https://` URL usable as a
    /// header value. One bad entry fails the whole list.
    pub fn allowed_origins(&self) -> Result<Vec<HeaderValue>, String> {
        self.cors_origins
            .iter()
            .map(|origin| {
                if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                    return Err(format!(
                        "CORS origin '{}' must start with http:// or https://",
                        origin
                    ));
                }
                HeaderValue::from_str(origin)
                    .map_err(|e| format!("invalid CORS origin '{}': {}", origin, e))
            })
            .collect()
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be > 0".to_string());
        }
        self.socket_addr()
            .parse::<SocketAddr>()
            .map_err(|e| format!("invalid bind address '{}': {}", self.socket_addr(), e))?;
        self.allowed_origins()?;
        self.log_level
            .parse::<crate::observability::Severity>()
            .map(|_| ())
    }
}
