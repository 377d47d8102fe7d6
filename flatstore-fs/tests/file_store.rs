use flatstore_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::StoreError,
};
use flatstore_fs::FileStore;
use serde_json::{Value, json};

async fn fresh_store(root: &std::path::Path) -> Result<FileStore, anyhow::Error> {
    Ok(FileStore::builder(root).build().await?)
}

#[tokio::test]
async fn read_of_missing_collection_materializes_fallback() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let store = fresh_store(dir.path()).await?;

    let value = store
        .read_value("new/b.json", json!({ "count": 0 }))
        .await?;
    assert_eq!(value, json!({ "count": 0 }));

    // The file now exists on disk with the fallback as its content.
    let bytes = std::fs::read(dir.path().join("new/b.json"))?;
    let on_disk: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(on_disk, json!({ "count": 0 }));

    // A later read with a different fallback still sees the original content.
    let again = store
        .read_value("new/b.json", json!({ "count": 99 }))
        .await?;
    assert_eq!(again, json!({ "count": 0 }));

    Ok(())
}

#[tokio::test]
async fn write_then_read_ignores_fallback() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let store = fresh_store(dir.path()).await?;

    store.write_value("a.json", json!([1, 2, 3])).await?;

    let value = store.read_value("a.json", json!([])).await?;
    assert_eq!(value, json!([1, 2, 3]));

    Ok(())
}

#[tokio::test]
async fn round_trip_preserves_nested_values() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let store = fresh_store(dir.path()).await?;

    let value = json!({
        "name": "Grünkohl 🌱",
        "tags": ["a", "b", ["nested", { "deep": null }]],
        "count": 42,
        "ratio": 0.5,
        "active": true,
        "missing": null,
    });

    store.write_value("knowledge/articles.json", value.clone()).await?;

    // Parse the raw bytes back rather than going through the store, so the
    // assertion covers what actually landed on disk.
    let bytes = std::fs::read(dir.path().join("knowledge/articles.json"))?;
    let on_disk: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(on_disk, value);

    Ok(())
}

#[tokio::test]
async fn files_are_pretty_printed() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let store = fresh_store(dir.path()).await?;

    store.write_value("a.json", json!([1, 2, 3])).await?;

    let text = std::fs::read_to_string(dir.path().join("a.json"))?;
    assert_eq!(text, "[\n  1,\n  2,\n  3\n]");

    Ok(())
}

#[tokio::test]
async fn reload_from_same_root_sees_existing_data() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let store = fresh_store(dir.path()).await?;
    store
        .write_value("users/users.json", json!([{ "name": "Alice" }]))
        .await?;

    let reloaded = fresh_store(dir.path()).await?;
    let users = reloaded.read_value("users/users.json", json!([])).await?;
    assert_eq!(users, json!([{ "name": "Alice" }]));

    Ok(())
}

#[tokio::test]
async fn malformed_content_is_a_fatal_parse_error() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let store = fresh_store(dir.path()).await?;

    std::fs::write(dir.path().join("broken.json"), b"{ not json")?;

    let err = store
        .read_value("broken.json", json!([]))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Malformed(path, _) if path == "broken.json"));

    // The store does not repair or quarantine the corrupt file.
    assert_eq!(std::fs::read(dir.path().join("broken.json"))?, b"{ not json");

    Ok(())
}

#[tokio::test]
async fn escaping_paths_are_rejected() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let store = fresh_store(dir.path()).await?;

    let err = store
        .read_value("../outside.json", json!([]))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidPath(_)));

    let err = store
        .write_value("/etc/passwd", json!([]))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidPath(_)));

    Ok(())
}

#[tokio::test]
async fn non_missing_io_failures_propagate() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let store = fresh_store(dir.path()).await?;

    // A directory squatting on the collection path is neither missing nor
    // parseable, so the read must fail with an I/O error.
    std::fs::create_dir(dir.path().join("taken.json"))?;

    let err = store
        .read_value("taken.json", json!([]))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Io(_, _)));

    Ok(())
}
