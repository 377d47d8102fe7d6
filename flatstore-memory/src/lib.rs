//! In-memory collection storage backend for flatstore.
//!
//! This crate provides a volatile implementation of the `StoreBackend` trait
//! with the same read/write contract as the file backend. It is ideal for
//! tests and for callers that do not need data to outlive the process.
//!
//! # Quick Start
//!
//! ```ignore
//! use flatstore::{Store, memory::MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Store::new(MemoryStore::new());
//!
//!     let count: u64 = store.read("counters/visits.json", 0).await?;
//!     assert_eq!(count, 0);
//!
//!     Ok(())
//! }
//! ```

pub mod store;

pub use store::{MemoryStore, MemoryStoreBuilder};
