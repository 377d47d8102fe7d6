//! Main flatstore crate providing a unified interface for file-backed JSON collections.
//!
//! This crate is the primary entry point for users of the flatstore project.
//! It re-exports the core types and functionality from the sub-crates and
//! provides convenient access to the storage backends.
//!
//! A store maps relative paths (e.g. `"users/users.json"`) to collections,
//! each holding one arbitrary JSON value. Writes to the same collection never
//! interleave and apply in call order; a collection read before it exists is
//! materialized from a caller-supplied fallback value.
//!
//! # Features
//!
//! - **Path-addressed collections** - One JSON file per collection, grouped by domain
//! - **Typed or untyped access** - Work with raw `serde_json::Value`s or your own record types
//! - **Per-collection write serialization** - FIFO write queue per file, independent across files
//! - **Multiple backends** - File-backed persistence or in-memory storage with an extensible trait system
//!
//! # Quick Start
//!
//! ```ignore
//! use flatstore::{prelude::*, fs::FileStore};
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
//! #[tokio::main]
//! async fn main() {
//!     // Create a file-backed store rooted at ./data
//!     let store = Store::new(FileStore::builder("./data").build().await.unwrap());
//!
//!     // Get a typed handle for the users collection
//!     let users = store.typed_collection::<User>();
//!
//!     // Append a record; the collection file is created on first use
//!     users
//!         .insert(User { id: 1, name: "Alice".to_string() })
//!         .await
//!         .unwrap();
//!
//!     // Load all records back
//!     let all = users.all().await.unwrap();
//!     println!("Stored users: {all:?}");
//!
//!     // Shutdown the store
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! For scenarios where the backend type is not known at compile time, a typed
//! `Store` can be converted into a dynamically dispatched store with the
//! `into_dyn` method. This allows runtime selection of backends, for example
//! an in-memory store in tests and a file store in production.
//!
//! ```ignore
//! use flatstore::{prelude::*, fs::FileStore, memory::MemoryStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = if std::env::var("EPHEMERAL").is_ok() {
//!         Store::new(MemoryStore::new()).into_dyn()
//!     } else {
//!         Store::new(FileStore::builder("./data").build().await.unwrap()).into_dyn()
//!     };
//!
//!     let visits: u64 = store
//!         .update("counters/visits.json", |v| v + 1, 0)
//!         .await
//!         .unwrap();
//!     println!("Visits: {visits}");
//!
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Backends
//!
//! - [`fs`] - File-backed persistence, one pretty-printed JSON file per collection
//! - [`memory`] - Fast in-memory storage for development and testing

pub mod prelude;

pub use flatstore_core::{backend, collection, document, error, store};

/// File-backed storage backend implementations.
pub mod fs {
    pub use flatstore_fs::{FileStore, FileStoreBuilder};
}

/// In-memory storage backend implementations.
pub mod memory {
    pub use flatstore_memory::{MemoryStore, MemoryStoreBuilder};
}
