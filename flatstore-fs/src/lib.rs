//! File-backed collection storage backend for flatstore.
//!
//! This crate provides the persistent implementation of the `StoreBackend`
//! trait: one JSON file per collection under a fixed root directory, with
//! writes to the same file serialized through a per-path FIFO queue.
//!
//! # Features
//!
//! - **One file per collection** - Collections addressed by relative path under the root
//! - **Fallback materialization** - Missing collections are created from the
//!   fallback on first read, including intermediate directories
//! - **Per-file write serialization** - Writes to the same file never
//!   interleave and apply in call order; writes to different files are independent
//! - **Human-readable files** - Pretty-printed JSON, stable for version
//!   control diffs and manual inspection
//!
//! # Quick Start
//!
//! ```ignore
//! use flatstore::{Store, fs::FileStore, backend::StoreBackendBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = FileStore::builder("./data").build().await?;
//!     let store = Store::new(backend);
//!
//!     store.write("forums/threads.json", &vec!["hello"]).await?;
//!     let threads: Vec<String> = store.read("forums/threads.json", Vec::new()).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod store;

pub use store::{FileStore, FileStoreBuilder};
