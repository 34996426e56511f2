//! # HTTP Server
//!
//! Combines the item and observability routers behind a CORS layer and
//! serves them until Ctrl-C.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::core::Service;
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};

use super::config::HttpServerConfig;
use super::item_routes::{item_routes, ItemState};
use super::observability_routes::observability_routes;

/// HTTP server for the item service
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server dispatching to `service`
    pub fn new(
        config: HttpServerConfig,
        service: Arc<dyn Service>,
        metrics: Arc<MetricsRegistry>,
    ) -> Result<Self, String> {
        let router = build_router(&config, service, metrics)?;
        Ok(Self { config, router })
    }

    /// Start the HTTP server and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address: {}", e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?.to_string();
        log_event_with_fields(Event::Serving, &[("address", &bound)]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event_with_fields(Event::ShutdownComplete, &[("address", &bound)]);
        Ok(())
    }
}

/// Build the combined router
///
/// Fails if any configured CORS origin is malformed.
pub fn build_router(
    config: &HttpServerConfig,
    service: Arc<dyn Service>,
    metrics: Arc<MetricsRegistry>,
) -> Result<Router, String> {
    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(config.allowed_origins()?))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Ok(Router::new()
        .merge(observability_routes(metrics))
        .merge(item_routes(Arc::new(ItemState::new(service))))
        .layer(cors))
}

async fn shutdown_signal() {
    // If the handler cannot be installed, serve until the process is killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
