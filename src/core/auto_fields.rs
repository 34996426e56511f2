//! Auto-populated Fields
//!
//! A decorator that stamps identity, timestamps and namespace tags onto
//! items on their way into the wrapped service. Reads pass through.

use std::sync::Arc;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::Value;

use super::error::CoreResult;
use super::namespace::Namespace;
use super::service::{Item, Rewrite, Service};

pub const UUID_FIELD: &str = "uuid";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";
pub const GROUP_FIELD: &str = "group";
pub const KIND_FIELD: &str = "kind";

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of globally unique identifiers
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Timestamp text format: RFC 3339, nanosecond precision, `Z` suffix
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?;
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

/// Field-injection decorator
pub struct AutoFields<S> {
    next: S,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl<S: Service> AutoFields<S> {
    /// Wrap `next` using the wall clock and random UUIDs
    pub fn new(next: S) -> Self {
        Self::with_sources(next, Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    /// Wrap `next` with explicit time and id sources
    pub fn with_sources(next: S, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { next, clock, ids }
    }

    fn now(&self) -> Value {
        Value::String(format_timestamp(self.clock.now()))
    }

    /// Current time, forced strictly past the stored `updatedAt`
    fn updated_after(&self, current: &Item) -> Value {
        let now = self.clock.now();
        let at = match current.get(UPDATED_AT_FIELD).and_then(parse_timestamp) {
            Some(prev) if now <= prev => prev + Duration::nanoseconds(1),
            _ => now,
        };
        Value::String(format_timestamp(at))
    }

    fn stamp_replacement(&self, key: &str, current: &Item, mut item: Item) -> Item {
        // The store overwrites whole items; carry creation fields forward.
        for field in [UUID_FIELD, CREATED_AT_FIELD] {
            match current.get(field) {
                Some(value) => {
                    item.insert(field.to_string(), value.clone());
                }
                None => {
                    item.remove(field);
                }
            }
        }

        item.insert(UPDATED_AT_FIELD.to_string(), self.updated_after(current));
        Self::tag_namespace(&mut item, key);
        item
    }

    fn tag_namespace(item: &mut Item, key: &str) {
        let ns = Namespace::from_key(key);
        if ns.has_group() {
            item.insert(GROUP_FIELD.to_string(), Value::String(ns.group));
        }
        item.insert(KIND_FIELD.to_string(), Value::String(ns.kind));
    }
}

impl<S: Service> Service for AutoFields<S> {
    fn list(&self, key: &str) -> CoreResult<Vec<Item>> {
        self.next.list(key)
    }

    fn create(&self, key: &str, mut item: Item) -> CoreResult<Item> {
        let now = self.now();
        item.insert(UUID_FIELD.to_string(), Value::String(self.ids.generate()));
        item.insert(CREATED_AT_FIELD.to_string(), now.clone());
        item.insert(UPDATED_AT_FIELD.to_string(), now);
        Self::tag_namespace(&mut item, key);

        self.next.create(key, item)
    }

    fn read(&self, key: &str, id: &str) -> CoreResult<Item> {
        self.next.read(key, id)
    }

    fn replace_with(&self, key: &str, id: &str, rewrite: Rewrite<'_>) -> CoreResult<()> {
        self.next.replace_with(
            key,
            id,
            Box::new(move |current: &Item| -> CoreResult<Item> {
                let item = rewrite(current)?;
                Ok(self.stamp_replacement(key, current, item))
            }),
        )
    }

    fn delete(&self, key: &str, id: &str) -> CoreResult<()> {
        self.next.delete(key, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CoreError;
    use crate::core::store::NamespaceStore;
    use chrono::{Duration, TimeZone};
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    struct StepClock {
        ticks: AtomicU64,
    }

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::SeqCst) as i64;
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap() + Duration::seconds(tick)
        }
    }

    struct SeqIds {
        next: AtomicU64,
    }

    impl IdGenerator for SeqIds {
        fn generate(&self) -> String {
            format!("uuid-{}", self.next.fetch_add(1, Ordering::SeqCst))
        }
    }

    fn service() -> AutoFields<NamespaceStore> {
        AutoFields::with_sources(
            NamespaceStore::new(),
            Arc::new(StepClock { ticks: AtomicU64::new(0) }),
            Arc::new(SeqIds { next: AtomicU64::new(1) }),
        )
    }

    fn item(value: Value) -> Item {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(at), "2024-01-02T03:04:05.000000000Z");
    }

    #[test]
    fn test_create_injects_fields() {
        let svc = service();
        let stored = svc
            .create("apps/widget", item(json!({"id": "foo", "bar": "baz"})))
            .unwrap();

        assert_eq!(stored["id"], json!("foo"));
        assert_eq!(stored["bar"], json!("baz"));
        assert_eq!(stored["uuid"], json!("uuid-1"));
        assert_eq!(stored["group"], json!("apps"));
        assert_eq!(stored["kind"], json!("widget"));
        assert_eq!(stored["createdAt"], json!("2024-01-02T03:04:05.000000000Z"));
        assert_eq!(stored["createdAt"], stored["updatedAt"]);

        assert_eq!(svc.read("apps/widget", "foo").unwrap(), stored);
    }

    #[test]
    fn test_create_without_group_tags_kind_only() {
        let svc = service();
        let stored = svc.create("/foo", item(json!({"id": "foo"}))).unwrap();
        assert_eq!(stored["kind"], json!("foo"));
        assert!(!stored.contains_key("group"));
    }

    #[test]
    fn test_create_overrides_client_fields() {
        let svc = service();
        let stored = svc
            .create(
                "apps/widget",
                item(json!({"id": "foo", "uuid": "mine", "kind": "other"})),
            )
            .unwrap();
        assert_eq!(stored["uuid"], json!("uuid-1"));
        assert_eq!(stored["kind"], json!("widget"));
    }

    #[test]
    fn test_replace_stamps_updated_at() {
        let svc = service();
        let created = svc.create("apps/widget", item(json!({"id": "foo"}))).unwrap();

        svc.replace(
            "apps/widget",
            "foo",
            item(json!({"id": "foo", "bar": "baz2", "bool": true})),
        )
        .unwrap();

        let stored = svc.read("apps/widget", "foo").unwrap();
        assert_eq!(stored["bar"], json!("baz2"));
        assert_eq!(stored["bool"], json!(true));
        assert_eq!(stored["kind"], json!("widget"));
        assert_eq!(stored["group"], json!("apps"));
        assert_eq!(stored["createdAt"], created["createdAt"]);
        assert_eq!(stored["uuid"], created["uuid"]);
        assert_ne!(stored["updatedAt"], stored["createdAt"]);
    }

    #[test]
    fn test_replace_ignores_client_created_at() {
        let svc = service();
        let created = svc.create("g/k", item(json!({"id": "foo"}))).unwrap();
        svc.replace("g/k", "foo", item(json!({"id": "foo", "createdAt": "yesterday"})))
            .unwrap();
        let stored = svc.read("g/k", "foo").unwrap();
        assert_eq!(stored["createdAt"], created["createdAt"]);
    }

    #[test]
    fn test_replace_missing_propagates() {
        let svc = service();
        assert!(matches!(
            svc.replace("g/k", "foo", item(json!({"id": "foo"}))),
            Err(CoreError::NamespaceNotFound { .. })
        ));
    }

    #[test]
    fn test_chains_over_another_decorator() {
        let store = Arc::new(NamespaceStore::new());
        let svc = AutoFields::new(AutoFields::new(Arc::clone(&store)));
        let stored = svc.create("g/k", item(json!({"id": "foo"}))).unwrap();
        assert!(stored.contains_key("uuid"));
        assert_eq!(store.read("g/k", "foo").unwrap(), stored);
    }

    #[test]
    fn test_immediate_replace_moves_updated_at_on_wall_clock() {
        let svc = AutoFields::new(NamespaceStore::new());
        let created = svc.create("g/k", item(json!({"id": "foo"}))).unwrap();
        svc.replace("g/k", "foo", item(json!({"id": "foo", "n": 1})))
            .unwrap();

        let stored = svc.read("g/k", "foo").unwrap();
        assert_eq!(stored["createdAt"], created["createdAt"]);
        assert_ne!(stored["updatedAt"], stored["createdAt"]);
    }

    struct FrozenClock;

    impl Clock for FrozenClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
        }
    }

    #[test]
    fn test_updated_at_strictly_increases_when_clock_stalls() {
        let svc = AutoFields::with_sources(
            NamespaceStore::new(),
            Arc::new(FrozenClock),
            Arc::new(SeqIds { next: AtomicU64::new(1) }),
        );
        svc.create("g/k", item(json!({"id": "foo"}))).unwrap();
        svc.replace("g/k", "foo", item(json!({"id": "foo"}))).unwrap();
        svc.replace("g/k", "foo", item(json!({"id": "foo"}))).unwrap();

        let stored = svc.read("g/k", "foo").unwrap();
        assert_eq!(stored["createdAt"], json!("2024-01-02T03:04:05.000000000Z"));
        assert_eq!(stored["updatedAt"], json!("2024-01-02T03:04:05.000000002Z"));
    }

    /// Deletes and re-creates `foo` once, just before a replace reaches the store.
    struct RecreateBeforeReplace<S> {
        next: S,
        fired: AtomicBool,
    }

    impl<S: Service> Service for RecreateBeforeReplace<S> {
        fn list(&self, key: &str) -> CoreResult<Vec<Item>> {
            self.next.list(key)
        }

        fn create(&self, key: &str, item: Item) -> CoreResult<Item> {
            self.next.create(key, item)
        }

        fn read(&self, key: &str, id: &str) -> CoreResult<Item> {
            self.next.read(key, id)
        }

        fn replace_with(&self, key: &str, id: &str, rewrite: Rewrite<'_>) -> CoreResult<()> {
            if !self.fired.swap(true, Ordering::SeqCst) {
                self.next.delete(key, id)?;
                self.next.create(
                    key,
                    item(json!({
                        "id": id,
                        "uuid": "fresh",
                        "createdAt": "2030-01-01T00:00:00.000000000Z",
                        "updatedAt": "2030-01-01T00:00:00.000000000Z",
                    })),
                )?;
            }
            self.next.replace_with(key, id, rewrite)
        }

        fn delete(&self, key: &str, id: &str) -> CoreResult<()> {
            self.next.delete(key, id)
        }
    }

    #[test]
    fn test_replace_carries_fields_of_item_it_overwrites() {
        let svc = AutoFields::with_sources(
            RecreateBeforeReplace {
                next: NamespaceStore::new(),
                fired: AtomicBool::new(false),
            },
            Arc::new(StepClock { ticks: AtomicU64::new(0) }),
            Arc::new(SeqIds { next: AtomicU64::new(1) }),
        );
        let created = svc.create("g/k", item(json!({"id": "foo"}))).unwrap();
        assert_eq!(created["uuid"], json!("uuid-1"));

        svc.replace("g/k", "foo", item(json!({"id": "foo", "bar": 1})))
            .unwrap();

        let stored = svc.read("g/k", "foo").unwrap();
        assert_eq!(stored["bar"], json!(1));
        assert_eq!(stored["uuid"], json!("fresh"));
        assert_eq!(stored["createdAt"], json!("2030-01-01T00:00:00.000000000Z"));
        assert_eq!(stored["updatedAt"], json!("2030-01-01T00:00:00.000000001Z"));
    }
}
