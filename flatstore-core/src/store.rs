//! Main store interface for interacting with storage backends.
//!
//! This module provides the primary API for working with collection stores.
//! It exposes two store types:
//!
//! - [`Store`] - Typed store for working with a specific backend implementation
//! - [`DynStore`] - Dynamic dispatch store for runtime backend selection
//!
//! Additionally, it provides a conversion trait for flexible store type handling.
//!
//! # Example
//!
//! ```ignore
//! use flatstore::store::Store;
//!
//! let store = Store::new(backend);
//! let users: Vec<User> = store.read("users/users.json", Vec::new()).await?;
//! ```

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    backend::{DynStoreBackend, StoreBackend},
    collection::{Collection, DynCollection, DynTypedCollection, TypedCollection},
    document::Document,
    error::StoreResult,
};

/// A store bound to a specific backend implementation.
///
/// This struct provides path-addressed access to collections with
/// compile-time knowledge of the backend type. Every operation is generic
/// over any serde-representable content type, converting through
/// `serde_json::Value` at the backend boundary.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
///
/// # Example
///
/// ```ignore
/// let store = Store::new(my_backend);
/// let leaderboard = store.read("leaderboard/leaderboard.json", Vec::<Entry>::new()).await?;
/// ```
#[derive(Debug)]
pub struct Store<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> Store<B> {
    /// Creates a new store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Reads the collection at `path`, materializing it from `fallback` when absent.
    ///
    /// After this call returns normally the collection exists and its
    /// persisted content deserializes to the returned value. A subsequent
    /// read of the same path returns the persisted content regardless of the
    /// fallback supplied to it.
    ///
    /// # Arguments
    ///
    /// * `path` - Relative collection path, e.g. `"events/events.json"`
    /// * `fallback` - Initial content used when the collection is missing
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if conversion or the
    /// underlying read fails.
    pub async fn read<T>(&self, path: &str, fallback: T) -> StoreResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        Ok(serde_json::from_value(
            self.backend
                .read_value(path, serde_json::to_value(fallback)?)
                .await?,
        )?)
    }

    /// Overwrites the collection at `path` with `value` in full.
    ///
    /// Writes to the same path from this process never interleave and apply
    /// in call order; writes to different paths proceed independently.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if serialization or
    /// the underlying write fails.
    pub async fn write<T: Serialize>(&self, path: &str, value: &T) -> StoreResult<()> {
        Ok(self
            .backend
            .write_value(path, serde_json::to_value(value)?)
            .await?)
    }

    /// Loads the collection (or `fallback`), applies `f`, persists and
    /// returns the result.
    ///
    /// Not atomic with respect to concurrent `update` calls on the same path
    /// from this process: two concurrent calls can both read the same current
    /// value before either writes, producing a lost update (last writer wins
    /// on the transformed value, not compare-and-swap). This is a known
    /// limitation of the design, acceptable for low-contention data.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if the operation fails.
    pub async fn update<T, F>(&self, path: &str, f: F, fallback: T) -> StoreResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(T) -> T + Send,
    {
        let current = self.read(path, fallback).await?;
        let next = f(current);
        self.write(path, &next).await?;

        Ok(next)
    }

    /// Gets an untyped handle for the collection at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - Relative collection path
    pub fn collection<'a>(&'a self, path: &str) -> Collection<'a, B> {
        Collection::new(path.to_string(), &self.backend)
    }

    /// Gets a typed collection handle for the specified record type.
    ///
    /// The collection path is determined by the record type's
    /// `collection_path()` method.
    pub fn typed_collection<'a, D: Document>(&'a self) -> TypedCollection<'a, B, D> {
        TypedCollection::new(D::collection_path().to_string(), &self.backend)
    }

    /// Shuts down the store and releases backend resources.
    ///
    /// This consumes the store and should be called when no longer needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the shutdown operation fails.
    pub async fn shutdown(self) -> StoreResult<()> {
        self.backend.shutdown().await?;

        Ok(())
    }
}

#[derive(Debug)]
pub struct DynStore {
    backend: Box<dyn DynStoreBackend>,
}

impl DynStore {
    /// Creates a new dynamic store with the given backend trait object.
    pub fn new(backend: Box<dyn DynStoreBackend>) -> Self {
        Self { backend }
    }

    /// Reads the collection at `path`, materializing it from `fallback` when absent.
    pub async fn read<T>(&self, path: &str, fallback: T) -> StoreResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        Ok(serde_json::from_value(
            self.backend
                .read_value(path, serde_json::to_value(fallback)?)
                .await?,
        )?)
    }

    /// Overwrites the collection at `path` with `value` in full.
    pub async fn write<T: Serialize>(&self, path: &str, value: &T) -> StoreResult<()> {
        Ok(self
            .backend
            .write_value(path, serde_json::to_value(value)?)
            .await?)
    }

    /// Loads the collection (or `fallback`), applies `f`, persists and
    /// returns the result. Same lost-update caveat as [`Store::update`].
    pub async fn update<T, F>(&self, path: &str, f: F, fallback: T) -> StoreResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(T) -> T + Send,
    {
        let current = self.read(path, fallback).await?;
        let next = f(current);
        self.write(path, &next).await?;

        Ok(next)
    }

    /// Gets an untyped handle for the collection at `path`.
    pub fn collection<'a>(&'a self, path: &str) -> DynCollection<'a> {
        DynCollection::new(path.to_string(), &*self.backend)
    }

    /// Gets a typed collection handle for the specified record type.
    pub fn typed_collection<'a, D: Document>(&'a self) -> DynTypedCollection<'a, D> {
        DynTypedCollection::new(D::collection_path().to_string(), &*self.backend)
    }

    /// Shuts down the store and releases backend resources.
    pub async fn shutdown(self) -> StoreResult<()> {
        self.backend.shutdown_boxed().await
    }
}

/// Conversion trait for converting a store into a dynamic owned store.
///
/// This trait allows converting any store type to a [`DynStore`] for runtime
/// polymorphism.
pub trait IntoDynStore {
    /// Converts this store into a dynamic owned store.
    fn into_dyn(self) -> DynStore;
}

impl<B: StoreBackend + 'static> IntoDynStore for Store<B> {
    fn into_dyn(self) -> DynStore {
        DynStore::new(Box::new(self.backend))
    }
}

impl IntoDynStore for DynStore {
    fn into_dyn(self) -> DynStore {
        self
    }
}
