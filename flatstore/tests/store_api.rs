use flatstore::{fs::FileStore, memory::MemoryStore, prelude::*};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Thread {
    id: u64,
    title: String,
    replies: u64,
}

impl Document for Thread {
    fn collection_path() -> &'static str {
        "forums/threads.json"
    }
}

fn thread(id: u64, title: &str) -> Thread {
    Thread { id, title: title.to_string(), replies: 0 }
}

#[tokio::test]
async fn typed_collection_round_trip_on_file_backend() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let store = Store::new(FileStore::builder(dir.path()).build().await?);
    let threads = store.typed_collection::<Thread>();

    // First access materializes an empty collection.
    assert!(threads.all().await?.is_empty());

    threads.insert(thread(1, "welcome")).await?;
    let all = threads.insert(thread(2, "rules")).await?;
    assert_eq!(all.len(), 2);

    // The records land in the conventional domain-grouped file.
    assert!(dir.path().join("forums/threads.json").is_file());

    let bumped = threads
        .update(|mut items| {
            for item in &mut items {
                item.replies += 1;
            }
            items
        })
        .await?;
    assert!(bumped.iter().all(|t| t.replies == 1));

    store.shutdown().await?;

    Ok(())
}

#[tokio::test]
async fn typed_collection_behaves_the_same_in_memory() -> Result<(), anyhow::Error> {
    let store = Store::new(MemoryStore::new());
    let threads = store.typed_collection::<Thread>();

    threads.replace_all(vec![thread(1, "welcome")]).await?;

    let all = threads.all().await?;
    assert_eq!(all, vec![thread(1, "welcome")]);

    Ok(())
}

#[tokio::test]
async fn untyped_collection_updates_raw_values() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let store = Store::new(FileStore::builder(dir.path()).build().await?);

    let leaderboard = store.collection("leaderboard/leaderboard.json");

    let next = leaderboard
        .update(
            |mut value| {
                value["season"] = json!(2);
                value
            },
            json!({ "season": 1, "entries": [] }),
        )
        .await?;

    assert_eq!(next, json!({ "season": 2, "entries": [] }));
    assert_eq!(leaderboard.read(json!(null)).await?, next);

    Ok(())
}

#[tokio::test]
async fn dyn_store_selects_backends_at_runtime() -> Result<(), anyhow::Error> {
    let dir = tempfile::tempdir()?;

    for persistent in [true, false] {
        let store = if persistent {
            Store::new(FileStore::builder(dir.path()).build().await?).into_dyn()
        } else {
            Store::new(MemoryStore::new()).into_dyn()
        };

        let visits: u64 = store
            .update("counters/visits.json", |v| v + 1, 0)
            .await?;
        assert_eq!(visits, 1);

        let threads = store.typed_collection::<Thread>();
        threads.insert(thread(7, "dyn")).await?;
        assert_eq!(threads.all().await?.len(), 1);

        store.shutdown().await?;
    }

    // Only the file-backed pass left anything on disk.
    assert!(dir.path().join("counters/visits.json").is_file());

    Ok(())
}

#[tokio::test]
async fn generic_read_converts_through_json() -> Result<(), anyhow::Error> {
    let store = Store::new(MemoryStore::new());

    // A keyed-object collection rather than an array of records.
    let settings: std::collections::HashMap<String, bool> = store
        .read(
            "admin/settings.json",
            std::collections::HashMap::from([("signups_open".to_string(), true)]),
        )
        .await?;
    assert_eq!(settings.get("signups_open"), Some(&true));

    store.write("admin/flag.json", &"maintenance").await?;
    let flag: String = store.read("admin/flag.json", String::new()).await?;
    assert_eq!(flag, "maintenance");

    Ok(())
}

#[tokio::test]
async fn document_ext_converts_records() -> Result<(), anyhow::Error> {
    let original = thread(3, "conversions");

    let value = original.to_json()?;
    assert_eq!(value["title"], json!("conversions"));

    let restored = Thread::from_json(value)?;
    assert_eq!(restored, original);

    Ok(())
}
