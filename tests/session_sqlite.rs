#![cfg(feature = "sqlite")]

//! SQLite session store behavior against an in-memory database.

use ideaforge::ideas::Theme;
use ideaforge::session::{SessionStore, SqliteSessionStore, StoredOutputs};

async fn store() -> SqliteSessionStore {
    SqliteSessionStore::connect("sqlite::memory:")
        .await
        .unwrap()
}

fn sample_outputs() -> StoredOutputs {
    StoredOutputs {
        reframes: vec![Theme::new("Safety").with_item("How might we improve lighting?".to_string())],
        sketch_prompts: vec!["a shelter sketch".to_string()],
        image_urls: vec![Some("https://img.test/1.png".to_string()), None],
        layouts: vec![],
    }
}

#[tokio::test]
async fn created_session_round_trips() {
    let store = store().await;
    store
        .create_session("s-1", "improve the bus stop")
        .await
        .unwrap();

    let record = store.get_session("s-1").await.unwrap().unwrap();
    assert_eq!(record.id, "s-1");
    assert_eq!(record.challenge, "improve the bus stop");
    assert!(record.outputs.is_none());
    assert_eq!(record.created_at, record.updated_at);
}

#[tokio::test]
async fn unknown_session_is_none() {
    let store = store().await;
    assert!(store.get_session("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn creating_an_existing_id_is_a_no_op() {
    let store = store().await;
    store.create_session("s-1", "first challenge").await.unwrap();
    store.create_session("s-1", "second challenge").await.unwrap();

    let record = store.get_session("s-1").await.unwrap().unwrap();
    assert_eq!(record.challenge, "first challenge");
}

#[tokio::test]
async fn updated_outputs_round_trip_with_failed_slots() {
    let store = store().await;
    store.create_session("s-1", "challenge").await.unwrap();
    store.update_results("s-1", &sample_outputs()).await.unwrap();

    let record = store.get_session("s-1").await.unwrap().unwrap();
    let outputs = record.outputs.unwrap();
    assert_eq!(outputs, sample_outputs());
    assert_eq!(outputs.image_urls[1], None);
}

#[tokio::test]
async fn file_backed_store_survives_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("sessions.db").display()
    );

    let store = SqliteSessionStore::connect(&url).await.unwrap();
    store.create_session("s-1", "challenge").await.unwrap();
    store.update_results("s-1", &sample_outputs()).await.unwrap();
    drop(store);

    let reopened = SqliteSessionStore::connect(&url).await.unwrap();
    let record = reopened.get_session("s-1").await.unwrap().unwrap();
    assert_eq!(record.outputs.unwrap(), sample_outputs());
}

#[tokio::test]
async fn purge_leaves_fresh_sessions_alone() {
    let store = store().await;
    store.create_session("s-1", "challenge").await.unwrap();

    let removed = store.purge_expired().await.unwrap();
    assert_eq!(removed, 0);
    assert!(store.get_session("s-1").await.unwrap().is_some());
}
