//! In-memory storage implementation for collection stores.
//!
//! This module provides a simple in-memory backend that keeps collection
//! contents as JSON values in a HashMap behind an async-safe read-write lock.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mea::rwlock::RwLock;
use serde_json::Value;

use flatstore_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::StoreResult,
};

type CollectionMap = HashMap<String, Value>;

/// Thread-safe in-memory collection storage backend.
///
/// This struct implements the [`StoreBackend`] trait with the same contract
/// as the file backend, minus persistence: a missing collection is
/// materialized from the fallback on first read, and a write replaces the
/// collection's content in full. Useful for tests and for callers that do
/// not need data to survive the process.
///
/// # Thread Safety
///
/// `MemoryStore` is cloneable and uses an `Arc`-wrapped internal map, so it
/// can be shared across async tasks; clones see the same data. Writes are
/// serialized by the write lock, which hands the map to writers in arrival
/// order.
///
/// # Example
///
/// ```ignore
/// use flatstore_memory::MemoryStore;
/// use flatstore::backend::StoreBackend;
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryStore::new();
///
///     store.write_value("users/users.json", json!([{ "name": "Alice" }])).await?;
///     let users = store.read_value("users/users.json", json!([])).await?;
///     assert_eq!(users.as_array().unwrap().len(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct MemoryStore {
    /// The storage map: collection path -> collection content
    collections: Arc<RwLock<CollectionMap>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(CollectionMap::new())),
        }
    }

    /// Creates a builder for constructing a `MemoryStore`.
    ///
    /// Currently the builder simply creates a default store, but it can be
    /// extended in future versions to support configuration options.
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::default()
    }
}

#[async_trait]
impl StoreBackend for MemoryStore {
    async fn read_value(&self, path: &str, fallback: Value) -> StoreResult<Value> {
        {
            let collections = self.collections.read().await;

            if let Some(value) = collections.get(path) {
                return Ok(value.clone());
            }
        }

        // Missing collection: materialize the fallback so later reads see a
        // consistent existing entry regardless of their own fallback.
        let mut collections = self.collections.write().await;

        Ok(collections
            .entry(path.to_string())
            .or_insert(fallback)
            .clone())
    }

    async fn write_value(&self, path: &str, value: Value) -> StoreResult<()> {
        self.collections
            .write()
            .await
            .insert(path.to_string(), value);

        Ok(())
    }
}

/// Builder for constructing [`MemoryStore`] instances.
#[derive(Default)]
pub struct MemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for MemoryStoreBuilder {
    type Backend = MemoryStore;

    /// Builds and returns a new [`MemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(MemoryStore::new())
    }
}
