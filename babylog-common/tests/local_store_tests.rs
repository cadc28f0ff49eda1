//! Integration tests for the local SQLite store
//!
//! Covers the storage contract: upsert/list round-trip, replace-not-append
//! upsert semantics, idempotent remove, copy-on-import with fresh ids, and
//! date-descending list order.

use babylog_common::schema::SleepSlot;
use babylog_common::store::LocalStore;
use babylog_common::LogRecord;
use tempfile::TempDir;

async fn open_store(dir: &TempDir) -> LocalStore {
    LocalStore::open(&dir.path().join("babylog.db"))
        .await
        .expect("Should open store in temp dir")
}

fn record(id: &str, date: &str) -> LogRecord {
    LogRecord {
        id: id.to_string(),
        date: date.to_string(),
        ..LogRecord::default()
    }
}

#[tokio::test]
async fn upsert_then_list_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    let mut saved = record("a", "2024-01-01");
    saved.summary = "first day home".to_string();
    saved.stats.weight = "3.4".to_string();
    saved.supplements.d3 = true;
    saved.sleeps[0] = SleepSlot {
        start: "13:00".to_string(),
        end: "15:00".to_string(),
    };

    let returned = store.upsert(saved.clone()).await.unwrap();
    assert_eq!(returned, saved);

    let listed = store.list().await.unwrap();
    assert_eq!(listed, vec![saved]);
}

#[tokio::test]
async fn upsert_same_id_replaces_instead_of_appending() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    store.upsert(record("a", "2024-01-01")).await.unwrap();
    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].date, "2024-01-01");

    store.upsert(record("a", "2024-01-02")).await.unwrap();
    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "a");
    assert_eq!(listed[0].date, "2024-01-02");
}

#[tokio::test]
async fn remove_missing_id_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    store.upsert(record("a", "2024-01-01")).await.unwrap();
    store.remove("does-not-exist").await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);

    store.remove("a").await.unwrap();
    assert!(store.list().await.unwrap().is_empty());
    // Removing again still succeeds
    store.remove("a").await.unwrap();
}

#[tokio::test]
async fn list_orders_by_date_descending() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    store.upsert(record("mid", "2024-02-10")).await.unwrap();
    store.upsert(record("new", "2024-03-01")).await.unwrap();
    store.upsert(record("old", "2024-01-05")).await.unwrap();

    let dates: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.date)
        .collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-10", "2024-01-05"]);
}

#[tokio::test]
async fn bulk_import_assigns_fresh_ids_and_keeps_existing_records() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    store.upsert(record("existing", "2024-01-01")).await.unwrap();

    let r1 = record("r1", "2024-02-01");
    let r2 = record("r2", "2024-02-02");
    store.bulk_import(vec![r1, r2]).await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 3);

    let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
    assert!(ids.contains(&"existing"));
    // Imported records never keep their source ids
    assert!(!ids.contains(&"r1"));
    assert!(!ids.contains(&"r2"));

    let imported: Vec<&str> = ids.iter().copied().filter(|id| *id != "existing").collect();
    assert_eq!(imported.len(), 2);
    assert_ne!(imported[0], imported[1]);
}

#[tokio::test]
async fn bulk_import_copies_rather_than_overwrites_on_matching_id() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    let mut original = record("a", "2024-01-01");
    original.summary = "original".to_string();
    store.upsert(original).await.unwrap();

    // Re-importing a record that carries an existing id must add a copy,
    // not replace the original.
    let mut incoming = record("a", "2024-01-01");
    incoming.summary = "imported copy".to_string();
    store.bulk_import(vec![incoming]).await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    let summaries: Vec<&str> = listed.iter().map(|r| r.summary.as_str()).collect();
    assert!(summaries.contains(&"original"));
    assert!(summaries.contains(&"imported copy"));
}

#[tokio::test]
async fn store_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = open_store(&dir).await;
        store.upsert(record("a", "2024-01-01")).await.unwrap();
    }

    let reopened = open_store(&dir).await;
    let listed = reopened.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "a");
}
