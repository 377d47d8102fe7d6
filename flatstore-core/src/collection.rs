//! Collection handles bound to a single collection path.
//!
//! This module provides handle types for working with one collection at a
//! time. It offers both untyped handles (raw JSON values) and typed handles
//! (record vectors with full type safety).
//!
//! # Collection Types
//!
//! - [`Collection`] - Untyped handle working with explicit JSON values
//! - [`TypedCollection`] - Type-safe handle for a specific record type
//! - [`DynCollection`] - Dynamic dispatch version of the untyped handle
//! - [`DynTypedCollection`] - Dynamic dispatch version of the typed handle
//!
//! # Example
//!
//! ```ignore
//! use flatstore::document::Document;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct User {
//!     pub id: u64,
//!     pub name: String,
//! }
//!
//! impl Document for User {
//!     fn collection_path() -> &'static str { "users/users.json" }
//! }
//!
//! # async fn example(store: &flatstore::store::Store<impl flatstore::backend::StoreBackend>) -> flatstore::error::StoreResult<()> {
//! // Get a typed collection and append a record
//! let users = store.typed_collection::<User>();
//! users.insert(User { id: 1, name: "Alice".to_string() }).await?;
//! # Ok(()) }
//! ```

use serde_json::Value;
use std::marker::PhantomData;

use crate::{
    backend::{DynStoreBackend, StoreBackend},
    document::Document,
    error::StoreResult,
};

/// An untyped collection handle with a reference to a storage backend.
///
/// This struct provides access to one collection with explicit JSON value
/// handling. The content is an arbitrary [`Value`], providing maximum
/// flexibility but without compile-time type safety.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the backend reference
/// * `B` - The storage backend type
#[derive(Debug)]
pub struct Collection<'a, B: StoreBackend> {
    path: String,
    backend: &'a B,
}

impl<'a, B: StoreBackend> Collection<'a, B> {
    /// Creates a new collection handle (internal use).
    pub(crate) fn new(path: String, backend: &'a B) -> Self {
        Self { path, backend }
    }

    /// Returns the relative path of this collection.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reads the collection content, materializing `fallback` when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if the operation fails.
    pub async fn read(&self, fallback: Value) -> StoreResult<Value> {
        Ok(self
            .backend
            .read_value(self.path(), fallback)
            .await?)
    }

    /// Overwrites the collection content in full.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if the operation fails.
    pub async fn write(&self, value: Value) -> StoreResult<()> {
        Ok(self
            .backend
            .write_value(self.path(), value)
            .await?)
    }

    /// Loads the current content (or `fallback`), applies `f`, persists and
    /// returns the result.
    ///
    /// Not atomic with respect to concurrent updates of the same collection:
    /// two overlapping calls can both read the same current value before
    /// either writes, losing one transformation (last writer wins).
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if the operation fails.
    pub async fn update<F>(&self, f: F, fallback: Value) -> StoreResult<Value>
    where
        F: FnOnce(Value) -> Value + Send,
    {
        let current = self.read(fallback).await?;
        let next = f(current);
        self.write(next.clone()).await?;

        Ok(next)
    }
}

/// A dynamic (type-erased) collection handle over a backend trait object.
///
/// This struct provides the same access as [`Collection`], but uses dynamic
/// dispatch via trait objects for backend operations. This enables using
/// different backend implementations at runtime without generic type
/// parameters.
#[derive(Debug)]
pub struct DynCollection<'a> {
    path: String,
    backend: &'a dyn DynStoreBackend,
}

impl<'a> DynCollection<'a> {
    /// Creates a new dynamic collection handle (internal use).
    pub(crate) fn new(path: String, backend: &'a dyn DynStoreBackend) -> Self {
        Self { path, backend }
    }

    /// Returns the relative path of this collection.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reads the collection content, materializing `fallback` when absent.
    pub async fn read(&self, fallback: Value) -> StoreResult<Value> {
        Ok(self
            .backend
            .read_value(self.path(), fallback)
            .await?)
    }

    /// Overwrites the collection content in full.
    pub async fn write(&self, value: Value) -> StoreResult<()> {
        Ok(self
            .backend
            .write_value(self.path(), value)
            .await?)
    }

    /// Loads the current content (or `fallback`), applies `f`, persists and
    /// returns the result. Same lost-update caveat as [`Collection::update`].
    pub async fn update<F>(&self, f: F, fallback: Value) -> StoreResult<Value>
    where
        F: FnOnce(Value) -> Value + Send,
    {
        let current = self.read(fallback).await?;
        let next = f(current);
        self.write(next.clone()).await?;

        Ok(next)
    }
}

#[derive(Debug)]
pub struct TypedCollection<'a, B: StoreBackend, D: Document> {
    path: String,
    backend: &'a B,
    _marker: PhantomData<D>,
}

impl<'a, B: StoreBackend, D: Document> TypedCollection<'a, B, D> {
    pub(crate) fn new(path: String, backend: &'a B) -> Self {
        Self { path, backend, _marker: PhantomData }
    }

    /// Returns the relative path of this collection.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Loads all records, materializing an empty array when the collection is absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if deserialization or the read fails.
    pub async fn all(&self) -> StoreResult<Vec<D>> {
        Ok(serde_json::from_value(
            self.backend
                .read_value(self.path(), Value::Array(Vec::new()))
                .await?,
        )?)
    }

    /// Replaces the full record set of this collection.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if serialization or the write fails.
    pub async fn replace_all(&self, documents: Vec<D>) -> StoreResult<()> {
        Ok(self
            .backend
            .write_value(self.path(), serde_json::to_value(documents)?)
            .await?)
    }

    /// Loads the current records, applies `f`, persists and returns the result.
    ///
    /// Same lost-update caveat as [`Collection::update`]: overlapping calls
    /// on one collection are last-writer-wins, not compare-and-swap.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if the operation fails.
    pub async fn update<F>(&self, f: F) -> StoreResult<Vec<D>>
    where
        F: FnOnce(Vec<D>) -> Vec<D> + Send,
    {
        let next = f(self.all().await?);
        self.replace_all(next.clone()).await?;

        Ok(next)
    }

    /// Appends a single record and returns the resulting record set.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if the operation fails.
    pub async fn insert(&self, document: D) -> StoreResult<Vec<D>> {
        self.update(move |mut documents| {
            documents.push(document);
            documents
        })
        .await
    }
}

#[derive(Debug)]
pub struct DynTypedCollection<'a, D: Document> {
    path: String,
    backend: &'a dyn DynStoreBackend,
    _marker: PhantomData<D>,
}

impl<'a, D: Document> DynTypedCollection<'a, D> {
    pub(crate) fn new(path: String, backend: &'a dyn DynStoreBackend) -> Self {
        Self { path, backend, _marker: PhantomData }
    }

    /// Returns the relative path of this collection.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Loads all records, materializing an empty array when the collection is absent.
    pub async fn all(&self) -> StoreResult<Vec<D>> {
        Ok(serde_json::from_value(
            self.backend
                .read_value(self.path(), Value::Array(Vec::new()))
                .await?,
        )?)
    }

    /// Replaces the full record set of this collection.
    pub async fn replace_all(&self, documents: Vec<D>) -> StoreResult<()> {
        Ok(self
            .backend
            .write_value(self.path(), serde_json::to_value(documents)?)
            .await?)
    }

    /// Loads the current records, applies `f`, persists and returns the
    /// result. Same lost-update caveat as [`Collection::update`].
    pub async fn update<F>(&self, f: F) -> StoreResult<Vec<D>>
    where
        F: FnOnce(Vec<D>) -> Vec<D> + Send,
    {
        let next = f(self.all().await?);
        self.replace_all(next.clone()).await?;

        Ok(next)
    }

    /// Appends a single record and returns the resulting record set.
    pub async fn insert(&self, document: D) -> StoreResult<Vec<D>> {
        self.update(move |mut documents| {
            documents.push(document);
            documents
        })
        .await
    }
}
