//! In-process [`ProductStore`] used by tests and local runs without
//! PostgreSQL.
//!
//! Ids come from a counter starting at 1 and are never reused, matching a
//! database sequence. Like a sequence, the counter refuses to wrap. A fault can be injected so every call fails the way an
//! unreachable database would.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::product::Product;
use crate::store::{ProductStore, StoreError};

#[derive(Debug)]
pub struct MemoryStore {
    rows: DashMap<i64, String>,
    next_id: AtomicI64,
    fault: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI64::new(1),
            fault: Mutex::new(None),
        }
    }

    /// Make every subsequent call fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fault.lock().unwrap_or_else(|e| e.into_inner()) = Some(message.into());
    }

    /// Clear an injected fault.
    pub fn recover(&self) {
        *self.fault.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.fault.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        self.check()?;
        let mut products: Vec<Product> = self
            .rows
            .iter()
            .map(|entry| Product::new(*entry.key(), entry.value().clone()))
            .collect();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn get(&self, id: i64) -> Result<Product, StoreError> {
        self.check()?;
        self.rows
            .get(&id)
            .map(|name| Product::new(id, name.value().clone()))
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, name: &str) -> Result<Product, StoreError> {
        self.check()?;
        let id = self
            .next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| id.checked_add(1))
            .map_err(|_| StoreError::Unavailable("product id sequence exhausted".to_string()))?;
        self.rows.insert(id, name.to_string());
        Ok(Product::new(id, name))
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<u64, StoreError> {
        self.check()?;
        match self.rows.get_mut(&id) {
            Some(mut entry) => {
                *entry.value_mut() = name.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        self.check()?;
        Ok(self.rows.remove(&id).map_or(0, |_| 1))
    }
}
