//! Error types and result types for store operations.
//!
//! This module provides the error handling surface for all store operations.
//! Use [`StoreResult<T>`] as the return type for fallible operations.
//!
//! A missing collection file (or a missing intermediate directory) is never
//! surfaced through these types: backends recover it transparently by
//! materializing the caller-supplied fallback value.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a store.
///
/// This enum covers serialization failures, corrupt collection content,
/// filesystem failures, and backend-specific errors. The store performs no
/// retries and no logging of its own; every variant propagates to the caller
/// unmodified.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Serialization/deserialization error when converting a value to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A collection file exists but its content is not valid JSON.
    /// The first argument is the collection path, the second the parse error.
    /// The store does not attempt to repair or quarantine corrupt files.
    #[error("Malformed collection {0}: {1}")]
    Malformed(String, String),
    /// A filesystem failure other than a missing file or directory
    /// (permission denied, disk full, device errors).
    /// The first argument is the affected path, the second the underlying error.
    #[error("I/O error on {0}: {1}")]
    Io(String, String),
    /// The collection path is absolute or contains `..` components, which
    /// would escape the store's data root.
    #[error("Invalid collection path: {0}")]
    InvalidPath(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for store operations.
///
/// This type alias is used throughout the crate to indicate operations that may fail
/// with a [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
