//! kindstore - schema-less, namespaced items over HTTP
//!
//! Items are free-form JSON objects grouped by `group`/`kind` and kept in
//! memory. Requests pass through a chain of decorators before reaching
//! the store.

pub mod cli;
pub mod core;
pub mod http_server;
pub mod observability;
