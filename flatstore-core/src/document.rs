//! Core traits for typed collection records.
//!
//! The store itself is schema-free: a collection holds one arbitrary JSON
//! value. This module layers optional typing on top for the common case of a
//! collection holding an array of records of one shape, and provides
//! utilities for converting records to and from JSON values.

use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};

use crate::error::StoreResult;

/// Trait for record types stored in a typed collection.
///
/// Implementing this trait ties a record type to the relative path of the
/// collection file holding its records, so callers can obtain a
/// [`TypedCollection`](crate::collection::TypedCollection) without repeating
/// the path at every call site.
///
/// # Example
///
/// ```ignore
/// use flatstore::document::Document;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct User {
///     pub id: u64,
///     pub name: String,
/// }
///
/// impl Document for User {
///     fn collection_path() -> &'static str {
///         "users/users.json"
///     }
/// }
/// ```
pub trait Document: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns the relative path of the collection file holding this record type.
    ///
    /// Paths conventionally group by domain, e.g. `"users/users.json"` or
    /// `"forums/threads.json"`. The store imposes no structure on them beyond
    /// treating them as relative file locations.
    fn collection_path() -> &'static str;
}

/// Extension trait providing JSON conversion utilities for documents.
///
/// This trait is automatically implemented for all types that implement
/// [`Document`].
pub trait DocumentExt: Document {
    /// Converts this document to a JSON value for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn to_json(&self) -> StoreResult<Value>;

    /// Creates a document from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    fn from_json(value: Value) -> StoreResult<Self>;
}

impl<D: Document> DocumentExt for D {
    fn to_json(&self) -> StoreResult<Value> {
        Ok(to_value(self)?)
    }

    fn from_json(value: Value) -> StoreResult<Self> {
        Ok(from_value(value)?)
    }
}
