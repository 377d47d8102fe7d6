//! Convenient re-exports of commonly used types from flatstore.
//!
//! Import this prelude module to quickly access the most frequently used
//! types and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use flatstore::prelude::*;
//! ```
//!
//! This provides access to:
//! - The store front-ends and conversion trait
//! - Collection handles
//! - Record traits
//! - Store backends and builders
//! - Error types

pub use flatstore_core::{
    backend::{DynStoreBackend, StoreBackend, StoreBackendBuilder},
    collection::{Collection, DynCollection, DynTypedCollection, TypedCollection},
    document::{Document, DocumentExt},
    error::{StoreError, StoreResult},
    store::{DynStore, IntoDynStore, Store},
};
