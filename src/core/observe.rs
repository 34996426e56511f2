//! Observing Decorator
//!
//! Logs one structured line per operation and feeds the metrics registry.
//! Results pass through untouched.

use std::sync::Arc;
use std::time::Instant;

use crate::observability::{Event, Logger, MetricsRegistry, Severity};

use super::error::{CoreError, CoreResult};
use super::service::{Item, Rewrite, Service, ID_FIELD};

/// Logging and metrics decorator
///
/// Successful reads log at TRACE and writes at INFO. Client errors log at
/// WARN and count as rejected; anything else logs at ERROR and counts as a
/// failure.
pub struct Observe<S> {
    next: S,
    metrics: Arc<MetricsRegistry>,
}

impl<S: Service> Observe<S> {
    /// Wrap `next`, reporting into a shared registry
    pub fn new(next: S, metrics: Arc<MetricsRegistry>) -> Self {
        Self { next, metrics }
    }

    fn record<T>(
        &self,
        event: Event,
        key: &str,
        id: Option<&str>,
        started: Instant,
        result: &CoreResult<T>,
    ) {
        let elapsed = started.elapsed().as_micros().to_string();
        let message = result.as_ref().err().map(CoreError::to_string);

        let mut fields: Vec<(&str, &str)> = vec![("namespace", key), ("elapsed_us", &elapsed)];
        if let Some(id) = id {
            fields.push(("id", id));
        }

        match (result, message.as_deref()) {
            (Err(err), Some(message)) => {
                fields.push(("operation", event.as_str()));
                fields.push(("code", err.code()));
                fields.push(("error", message));

                if err.is_client_error() {
                    self.metrics.increment_rejected();
                    Logger::warn(Event::OperationFailed.as_str(), &fields);
                } else {
                    self.metrics.increment_failures();
                    Logger::error(Event::OperationFailed.as_str(), &fields);
                }
            }
            _ => {
                if event.is_write() {
                    self.metrics.increment_writes();
                } else {
                    self.metrics.increment_reads();
                }
                match event {
                    Event::ItemCreated => self.metrics.increment_items_created(),
                    Event::ItemDeleted => self.metrics.increment_items_deleted(),
                    _ => {}
                }

                let severity = if event.is_write() {
                    Severity::Info
                } else {
                    Severity::Trace
                };
                Logger::log(severity, event.as_str(), &fields);
            }
        }
    }
}

impl<S: Service> Service for Observe<S> {
    fn list(&self, key: &str) -> CoreResult<Vec<Item>> {
        let started = Instant::now();
        let result = self.next.list(key);
        self.record(Event::ItemsListed, key, None, started, &result);
        result
    }

    fn create(&self, key: &str, item: Item) -> CoreResult<Item> {
        let started = Instant::now();
        let id = item
            .get(ID_FIELD)
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let result = self.next.create(key, item);
        self.record(Event::ItemCreated, key, id.as_deref(), started, &result);
        result
    }

    fn read(&self, key: &str, id: &str) -> CoreResult<Item> {
        let started = Instant::now();
        let result = self.next.read(key, id);
        self.record(Event::ItemRead, key, Some(id), started, &result);
        result
    }

    fn replace_with(&self, key: &str, id: &str, rewrite: Rewrite<'_>) -> CoreResult<()> {
        let started = Instant::now();
        let result = self.next.replace_with(key, id, rewrite);
        self.record(Event::ItemReplaced, key, Some(id), started, &result);
        result
    }

    fn delete(&self, key: &str, id: &str) -> CoreResult<()> {
        let started = Instant::now();
        let result = self.next.delete(key, id);
        self.record(Event::ItemDeleted, key, Some(id), started, &result);
        result
    }
}
