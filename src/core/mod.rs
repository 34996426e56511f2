//! # Item Service Core
//!
//! The namespaced in-memory store and the decorators that can be stacked
//! in front of it. Every link implements [`Service`], so a chain is built
//! by wrapping:
//!
//! ```ignore
//! let svc = Observe::new(AutoFields::new(NamespaceStore::new()), metrics);
//! ```

pub mod auto_fields;
pub mod error;
pub mod namespace;
pub mod observe;
pub mod service;
pub mod store;

pub use auto_fields::{AutoFields, Clock, IdGenerator, SystemClock, UuidGenerator};
pub use error::{CoreError, CoreResult};
pub use namespace::Namespace;
pub use observe::Observe;
pub use service::{Item, Rewrite, Service};
pub use store::NamespaceStore;
