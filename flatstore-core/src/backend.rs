//! Storage backend abstraction for the store.
//!
//! This module defines the traits that abstract over different storage
//! implementations, allowing the store front-end to work with various
//! backends (file-backed, in-memory, etc.).
//!
//! # Overview
//!
//! The [`StoreBackend`] trait provides a unified async interface over two
//! operations: reading a collection (with fallback materialization when it
//! does not exist yet) and overwriting a collection in full. Implementations
//! are required to be thread-safe (`Send + Sync`) and must serialize writes
//! to the same collection path: writes never interleave and apply in call
//! order (FIFO). Writes to distinct paths proceed independently.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`DynStoreBackend`]: A trait for dynamic dispatch over backend implementations
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use flatstore::backend::StoreBackend;
//! use serde_json::json;
//!
//! // Use a concrete backend implementation
//! let backend = MyBackendImpl::new();
//!
//! // Read a collection, creating it with the fallback if it is missing
//! let users = backend.read_value("users/users.json", json!([])).await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::error::StoreResult;

/// Abstract interface for collection storage backends.
///
/// A collection is a named container addressed by a relative path
/// (e.g. `"users/users.json"`) holding a single arbitrary JSON value. The
/// backend is entirely schema-free: it knows nothing about records, identity
/// fields, or the shape of the value it stores.
///
/// # Concurrency
///
/// Implementations must guarantee that at most one write to a given path is
/// in flight at a time from this process, with concurrent writers to the same
/// path queued in call order. No ordering is guaranteed between writes to
/// different paths, nor between a read and a concurrent write to the same
/// path: callers must await a write's completion before relying on
/// read-after-write consistency.
///
/// # Error Handling
///
/// Operations return [`StoreResult<T>`](crate::error::StoreResult). A missing
/// collection is not an error (it is materialized from the fallback); every
/// other failure is fatal and propagates to the caller without retries.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Reads the collection at `path`, materializing it from `fallback` when absent.
    ///
    /// If the collection does not exist yet, the backend persists `fallback`
    /// as its initial content (creating any missing parent structure) and
    /// returns it. After this call returns normally the collection exists and
    /// its content deserializes to the returned value.
    ///
    /// # Arguments
    ///
    /// * `path` - Relative collection path, e.g. `"forums/threads.json"`
    /// * `fallback` - Initial content used when the collection is missing
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Malformed`](crate::error::StoreError::Malformed)
    /// when existing content is not valid JSON, and
    /// [`StoreError::Io`](crate::error::StoreError::Io) for any filesystem
    /// failure other than a missing file or directory.
    async fn read_value(&self, path: &str, fallback: Value) -> StoreResult<Value>;

    /// Overwrites the collection at `path` with `value` in full.
    ///
    /// The write is enqueued behind any prior pending write to the same path
    /// (first-in-first-out) and replaces the previous content entirely; there
    /// is no partial or incremental write. There is also no temp-file-and-rename
    /// atomicity: a crash mid-write can corrupt the file. That is an accepted
    /// limitation of this store, not a guarantee to code against.
    ///
    /// # Arguments
    ///
    /// * `path` - Relative collection path
    /// * `value` - The new content of the collection
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if serialization or
    /// the underlying write fails.
    async fn write_value(&self, path: &str, value: Value) -> StoreResult<()>;

    /// Cleanly shuts down the backend, releasing any resources it holds.
    ///
    /// The default implementation is a no-op; backends with external
    /// resources should override this.
    async fn shutdown(self) -> StoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn read_value(&self, path: &str, fallback: Value) -> StoreResult<Value> {
        (*self).read_value(path, fallback).await
    }

    async fn write_value(&self, path: &str, value: Value) -> StoreResult<()> {
        (*self).write_value(path, value).await
    }
}

/// Object-safe mirror of [`StoreBackend`] for dynamic dispatch.
///
/// Automatically implemented for every `StoreBackend`, so any backend can be
/// boxed and selected at runtime.
#[async_trait]
pub trait DynStoreBackend: Send + Sync + Debug {
    async fn read_value(&self, path: &str, fallback: Value) -> StoreResult<Value>;
    async fn write_value(&self, path: &str, value: Value) -> StoreResult<()>;
    async fn shutdown_boxed(self: Box<Self>) -> StoreResult<()>;
}

#[async_trait]
impl<B: StoreBackend + Send + Sync + 'static> DynStoreBackend for B {
    async fn read_value(&self, path: &str, fallback: Value) -> StoreResult<Value> {
        StoreBackend::read_value(self, path, fallback).await
    }

    async fn write_value(&self, path: &str, value: Value) -> StoreResult<()> {
        StoreBackend::write_value(self, path, value).await
    }

    async fn shutdown_boxed(self: Box<Self>) -> StoreResult<()> {
        (*self).shutdown().await
    }
}

/// Factory trait for constructing backend instances.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> StoreResult<Self::Backend>;
}
