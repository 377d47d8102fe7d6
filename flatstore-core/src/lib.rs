//! A thin file-backed JSON document store that treats one JSON file as one collection.
//!
//! This crate is the core of the flatstore project and provides:
//!
//! - **Record traits** ([`document`]) - Traits for typing a collection's records
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing storage backends
//! - **Collection handles** ([`collection`]) - Typed and untyped access to one collection
//! - **Store front-end** ([`store`]) - Path-addressed read/write/update over a backend
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! A collection is addressed by a relative path (e.g. `"users/users.json"`)
//! and holds a single arbitrary JSON value, typically an array of records.
//! Backends guarantee that writes to the same collection never interleave and
//! apply in call order; a collection read before it exists is materialized
//! from a caller-supplied fallback value.
//!
//! # Example
//!
//! ```ignore
//! use flatstore::{Document, Store};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct User {
//!     pub id: u64,
//!     pub name: String,
//! }
//!
//! impl Document for User {
//!     fn collection_path() -> &'static str {
//!         "users/users.json"
//!     }
//! }
//! ```

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod store;
