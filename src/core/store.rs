//! Namespace Store
//!
//! In-memory tables of items, one table per namespace key.
//!
//! # Invariants
//!
//! - No two items in a table share an id
//! - A table is created by the first successful create into its key and is
//!   never removed, even when emptied
//! - create, replace and delete hold the store-wide write lock for the whole
//!   check-then-mutate sequence, so mutations are serialized across all
//!   namespaces
//! - A replacement is computed from the stored item under that same lock

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use super::error::{CoreError, CoreResult};
use super::service::{item_id, Item, Rewrite, Service, ID_FIELD};

/// Items of one namespace, by id
type Table = HashMap<String, Item>;

/// Store-wide mapping from namespace key to table
#[derive(Debug, Default)]
pub struct NamespaceStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl NamespaceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> CoreResult<RwLockReadGuard<'_, HashMap<String, Table>>> {
        self.tables
            .read()
            .map_err(|e| CoreError::internal(format!("store lock poisoned: {}", e)))
    }

    fn tables_mut(&self) -> CoreResult<RwLockWriteGuard<'_, HashMap<String, Table>>> {
        self.tables
            .write()
            .map_err(|e| CoreError::internal(format!("store lock poisoned: {}", e)))
    }
}

/// A replacement keeps the path id: fill it in when absent, reject a different one
fn bind_id(mut item: Item, id: &str) -> CoreResult<Item> {
    match item.get(ID_FIELD) {
        None => {
            item.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        }
        Some(_) => {
            let body_id = item_id(&item)?;
            if body_id != id {
                return Err(CoreError::invalid_item(format!(
                    "id '{}' does not match '{}'",
                    body_id, id
                )));
            }
        }
    }
    Ok(item)
}

impl Service for NamespaceStore {
    fn list(&self, key: &str) -> CoreResult<Vec<Item>> {
        let tables = self.tables()?;
        let table = tables
            .get(key)
            .ok_or_else(|| CoreError::namespace_not_found(key))?;

        let mut items = Vec::with_capacity(table.len());
        items.extend(table.values().cloned());
        Ok(items)
    }

    fn create(&self, key: &str, item: Item) -> CoreResult<Item> {
        let id = item_id(&item)?.to_string();

        let mut tables = self.tables_mut()?;
        let table = tables.entry(key.to_string()).or_default();

        if table.contains_key(&id) {
            return Err(CoreError::item_exists(id));
        }

        table.insert(id, item.clone());
        Ok(item)
    }

    fn read(&self, key: &str, id: &str) -> CoreResult<Item> {
        let tables = self.tables()?;
        let table = tables
            .get(key)
            .ok_or_else(|| CoreError::namespace_not_found(key))?;

        table
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::item_not_found(id))
    }

    fn replace_with(&self, key: &str, id: &str, rewrite: Rewrite<'_>) -> CoreResult<()> {
        let mut tables = self.tables_mut()?;
        let table = tables
            .get_mut(key)
            .ok_or_else(|| CoreError::namespace_not_found(key))?;

        let slot = table
            .get_mut(id)
            .ok_or_else(|| CoreError::item_not_found(id))?;
        let next = bind_id(rewrite(&*slot)?, id)?;
        *slot = next;

        Ok(())
    }

    fn delete(&self, key: &str, id: &str) -> CoreResult<()> {
        let mut tables = self.tables_mut()?;
        let table = tables
            .get_mut(key)
            .ok_or_else(|| CoreError::namespace_not_found(key))?;

        table
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CoreError::item_not_found(id))
    }
}
