//! File-backed storage implementation for collection stores.
//!
//! This module provides the backend that keeps each collection in its own
//! JSON file under a fixed root directory, with writes to the same file
//! serialized through a per-path queue.

use std::{
    collections::HashMap,
    io,
    path::{Component, Path, PathBuf},
    sync::{Arc, Mutex as SyncMutex, PoisonError},
};

use async_trait::async_trait;
use mea::mutex::Mutex;
use serde_json::Value;
use tokio::fs;

use flatstore_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
};

type LockMap = HashMap<PathBuf, Arc<Mutex<()>>>;

fn io_error(path: &Path, err: io::Error) -> StoreError {
    StoreError::Io(path.display().to_string(), err.to_string())
}

/// File-backed collection storage under a fixed root directory.
///
/// This struct implements the [`StoreBackend`] trait by mapping each
/// collection's relative path to a file under the root and storing its
/// content as pretty-printed JSON (2-space indentation, stable for diffing
/// and manual inspection). Intermediate directories are created on demand.
///
/// # Concurrency
///
/// `FileStore` is cloneable and shares its per-path lock registry across
/// clones. Each path gets a FIFO-fair async mutex created on first write and
/// evicted once no writer holds it, so the registry does not grow unboundedly
/// across many distinct paths. At most one write to a given file is in flight
/// at a time from this process; writes to different files proceed
/// independently. A read racing a write to the same path may observe either
/// the old or the new content.
///
/// # Durability
///
/// Files are overwritten in place with no temp-file-and-rename step, so a
/// crash mid-write can corrupt the file. The store is single-instance-only:
/// no file locks or leases coordinate with other processes.
///
/// # Example
///
/// ```ignore
/// use flatstore_fs::FileStore;
/// use flatstore::backend::StoreBackend;
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileStore::builder("./data").build().await?;
///
///     store.write_value("users/users.json", json!([{ "name": "Alice" }])).await?;
///     let users = store.read_value("users/users.json", json!([])).await?;
///     assert_eq!(users.as_array().unwrap().len(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct FileStore {
    /// Root directory all collection paths are resolved under
    root: PathBuf,
    /// Per-resolved-path write locks, created on demand and evicted when idle
    locks: Arc<SyncMutex<LockMap>>,
}

impl FileStore {
    /// Creates a file store rooted at the given directory.
    ///
    /// The directory is not created here; use [`FileStore::builder`] to have
    /// it created up front, or let the first write create it on demand.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Arc::new(SyncMutex::new(LockMap::new())),
        }
    }

    /// Creates a builder for constructing a `FileStore` rooted at `root`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use flatstore_fs::FileStore;
    ///
    /// let store = FileStore::builder("./data").build().await.unwrap();
    /// ```
    pub fn builder(root: impl Into<PathBuf>) -> FileStoreBuilder {
        FileStoreBuilder::new(root)
    }

    /// Returns the root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a relative collection path under the root.
    ///
    /// Absolute paths and `..` components are rejected: they would address
    /// files outside the data root.
    fn resolve(&self, path: &str) -> StoreResult<PathBuf> {
        let relative = Path::new(path);

        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(StoreError::InvalidPath(path.to_string()));
        }

        Ok(self.root.join(relative))
    }

    /// Fetches the write lock for a resolved path, creating it on first use.
    ///
    /// This is synchronous so a writer is registered in the queue before its
    /// first suspension point, which keeps the FIFO order aligned with the
    /// order writes are initiated in.
    fn lock_for(&self, resolved: &Path) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(resolved.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drops a path's lock entry once no writer holds it anymore.
    fn evict(&self, resolved: &Path) {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if locks
            .get(resolved)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(resolved);
        }
    }

    /// Performs the actual overwrite while the per-path lock is held.
    async fn write_resolved(&self, resolved: &Path, value: &Value) -> StoreResult<()> {
        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        let bytes = serde_json::to_vec_pretty(value)?;

        fs::write(resolved, bytes)
            .await
            .map_err(|e| io_error(resolved, e))
    }
}

#[async_trait]
impl StoreBackend for FileStore {
    async fn read_value(&self, path: &str, fallback: Value) -> StoreResult<Value> {
        let resolved = self.resolve(path)?;

        match fs::read(&resolved).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Malformed(path.to_string(), e.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // First read of a missing collection: persist the fallback
                // through the regular write queue, then hand it back.
                self.write_value(path, fallback.clone()).await?;

                Ok(fallback)
            }
            Err(e) => Err(io_error(&resolved, e)),
        }
    }

    async fn write_value(&self, path: &str, value: Value) -> StoreResult<()> {
        let resolved = self.resolve(path)?;
        let lock = self.lock_for(&resolved);

        let result = {
            let _guard = lock.lock().await;
            self.write_resolved(&resolved, &value).await
        };

        drop(lock);
        self.evict(&resolved);

        result
    }
}

/// Builder for constructing [`FileStore`] instances.
///
/// Building creates the root directory chain so the store starts from a
/// usable location.
///
/// # Example
///
/// ```ignore
/// use flatstore_fs::FileStore;
/// use flatstore::backend::StoreBackendBuilder;
///
/// #[tokio::main]
/// async fn main() {
///     let store = FileStore::builder("./data").build().await.unwrap();
/// }
/// ```
pub struct FileStoreBuilder {
    root: PathBuf,
}

impl FileStoreBuilder {
    /// Creates a builder rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl StoreBackendBuilder for FileStoreBuilder {
    type Backend = FileStore;

    /// Creates the root directory and returns the [`FileStore`] over it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the root directory cannot be created.
    async fn build(self) -> StoreResult<Self::Backend> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| io_error(&self.root, e))?;

        Ok(FileStore::new(self.root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_joins_relative_paths_under_root() {
        let store = FileStore::new("/data");

        let resolved = store.resolve("users/users.json").unwrap();
        assert_eq!(resolved, PathBuf::from("/data/users/users.json"));
    }

    #[test]
    fn resolve_rejects_absolute_paths() {
        let store = FileStore::new("/data");

        assert!(matches!(
            store.resolve("/etc/passwd"),
            Err(StoreError::InvalidPath(_))
        ));
    }

    #[test]
    fn resolve_rejects_parent_components() {
        let store = FileStore::new("/data");

        assert!(matches!(
            store.resolve("../outside.json"),
            Err(StoreError::InvalidPath(_))
        ));
        assert!(matches!(
            store.resolve("users/../../outside.json"),
            Err(StoreError::InvalidPath(_))
        ));
    }

    #[test]
    fn lock_entries_are_evicted_when_idle() {
        let store = FileStore::new("/data");
        let resolved = store.resolve("a.json").unwrap();

        let lock = store.lock_for(&resolved);
        assert_eq!(store.locks.lock().unwrap().len(), 1);

        // Still referenced by us, so the entry stays.
        store.evict(&resolved);
        assert_eq!(store.locks.lock().unwrap().len(), 1);

        drop(lock);
        store.evict(&resolved);
        assert!(store.locks.lock().unwrap().is_empty());
    }
}
