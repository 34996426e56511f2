//! # HTTP Server Module
//!
//! Binds the item service to HTTP with axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/metrics` - Operation counters
//! - `/{group}/{kind}[/{id}]` - Item CRUD

pub mod config;
pub mod errors;
pub mod item_routes;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use item_routes::ListResponse;
pub use server::{build_router, HttpServer};
