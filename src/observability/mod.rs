//! Observability subsystem
//!
//! - Structured logging (JSON lines)
//! - Operation counters
//! - Typed lifecycle and item events
//!
//! Observability is read-only: it never changes the outcome of the
//! operation it reports on.
//!
//! # Usage
//!
//! ```ignore
//! use kindstore::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::ItemCreated, &[("id", "foo")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::info(event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::info(event.as_str(), fields);
}
