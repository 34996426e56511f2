//! Service Contract
//!
//! The capability set shared by the store and every decorator in front of
//! it. Any implementation can wrap any other, so links are composed by
//! construction order.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::error::{CoreError, CoreResult};

/// A free-form record. Must carry a string `id`.
pub type Item = Map<String, Value>;

/// Field holding the record identity
pub const ID_FIELD: &str = "id";

/// Extract the non-empty string `id` of an item
pub fn item_id(item: &Item) -> CoreResult<&str> {
    match item.get(ID_FIELD) {
        Some(Value::String(id)) if !id.is_empty() => Ok(id),
        Some(Value::String(_)) => Err(CoreError::invalid_item("id must not be empty")),
        Some(_) => Err(CoreError::invalid_item("id must be a string")),
        None => Err(CoreError::invalid_item("id is required")),
    }
}

/// Builds the replacement for a stored item from its current value
///
/// Runs while the store holds its write lock: it must not call back into
/// the service.
pub type Rewrite<'a> = Box<dyn FnOnce(&Item) -> CoreResult<Item> + 'a>;

/// Operations over namespaced items
///
/// `key` is an encoded namespace key (see [`super::namespace::encode`]).
pub trait Service: Send + Sync {
    /// All items in a namespace, in no particular order
    fn list(&self, key: &str) -> CoreResult<Vec<Item>>;

    /// Store a new item, returning it as stored
    fn create(&self, key: &str, item: Item) -> CoreResult<Item>;

    /// A copy of one item
    fn read(&self, key: &str, id: &str) -> CoreResult<Item>;

    /// Overwrite an existing item with whatever `rewrite` returns
    ///
    /// The existence check, `rewrite` and the overwrite happen atomically
    /// with respect to every other mutation. Decorators wrap `rewrite`
    /// to adjust the replacement.
    fn replace_with(&self, key: &str, id: &str, rewrite: Rewrite<'_>) -> CoreResult<()>;

    /// Overwrite an existing item
    fn replace(&self, key: &str, id: &str, item: Item) -> CoreResult<()> {
        self.replace_with(key, id, Box::new(move |_: &Item| -> CoreResult<Item> { Ok(item) }))
    }

    /// Remove an existing item
    fn delete(&self, key: &str, id: &str) -> CoreResult<()>;
}

impl<S: Service + ?Sized> Service for Arc<S> {
    fn list(&self, key: &str) -> CoreResult<Vec<Item>> {
        (**self).list(key)
    }

    fn create(&self, key: &str, item: Item) -> CoreResult<Item> {
        (**self).create(key, item)
    }

    fn read(&self, key: &str, id: &str) -> CoreResult<Item> {
        (**self).read(key, id)
    }

    fn replace_with(&self, key: &str, id: &str, rewrite: Rewrite<'_>) -> CoreResult<()> {
        (**self).replace_with(key, id, rewrite)
    }

    fn replace(&self, key: &str, id: &str, item: Item) -> CoreResult<()> {
        (**self).replace(key, id, item)
    }

    fn delete(&self, key: &str, id: &str) -> CoreResult<()> {
        (**self).delete(key, id)
    }
}

impl<S: Service + ?Sized> Service for Box<S> {
    fn list(&self, key: &str) -> CoreResult<Vec<Item>> {
        (**self).list(key)
    }

    fn create(&self, key: &str, item: Item) -> CoreResult<Item> {
        (**self).create(key, item)
    }

    fn read(&self, key: &str, id: &str) -> CoreResult<Item> {
        (**self).read(key, id)
    }

    fn replace_with(&self, key: &str, id: &str, rewrite: Rewrite<'_>) -> CoreResult<()> {
        (**self).replace_with(key, id, rewrite)
    }

    fn replace(&self, key: &str, id: &str, item: Item) -> CoreResult<()> {
        (**self).replace(key, id, item)
    }

    fn delete(&self, key: &str, id: &str) -> CoreResult<()> {
        (**self).delete(key, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> Item {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_item_id() {
        assert_eq!(item_id(&item(json!({"id": "foo"}))).unwrap(), "foo");
    }

    #[test]
    fn test_item_id_rejects_bad_ids() {
        for bad in [json!({}), json!({"id": ""}), json!({"id": 7}), json!({"id": null})] {
            let err = item_id(&item(bad)).unwrap_err();
            assert!(matches!(err, CoreError::InvalidItem(_)));
        }
    }
}
