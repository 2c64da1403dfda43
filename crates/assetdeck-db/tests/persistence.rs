//! Integration tests for the on-disk store.
//!
//! Values written through one pool must be visible after reopening the
//! database file, which is what lets the playground survive restarts.

use assetdeck_core::services::keys;
use assetdeck_core::{
    PersistedProvisionRecord, PlaygroundState, Settings, SettingsStore, UserProfile,
};
use assetdeck_db::StoreFactory;

// ── Helpers ─────────────────────────────────────────────────────────

fn record(id: &str) -> PersistedProvisionRecord {
    PersistedProvisionRecord {
        id: id.to_string(),
        name: id.to_string(),
        slug: id.to_string(),
        endpoint: format!("http://{id}.svc/v1"),
        token: String::new(),
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_playground_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data").join("assetdeck.db");

    {
        let (pool, store) = StoreFactory::open(&db_path).await.unwrap();
        let playground = PlaygroundState::new(store);
        playground.append_playground_models(&[record("a")]).await.unwrap();
        playground
            .append_mcp_servers(&["GitHub".to_string()])
            .await
            .unwrap();
        playground.set_user_profile(UserProfile::AiAdmin).await.unwrap();
        pool.close().await;
    }

    let (_pool, store) = StoreFactory::open(&db_path).await.unwrap();
    let snapshot = PlaygroundState::new(store.clone()).snapshot().await.unwrap();
    assert_eq!(snapshot.playground_models, vec![record("a")]);
    assert_eq!(snapshot.playground_mcp_servers, vec!["GitHub"]);
    assert_eq!(snapshot.user_profile, UserProfile::AiAdmin);
    assert!(store.get(keys::PLAYGROUND_MODELS).await.unwrap().is_some());
}

#[tokio::test]
async fn test_settings_persist_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("assetdeck.db");

    let (_pool, store) = StoreFactory::open(&db_path).await.unwrap();
    let settings = SettingsStore::new(store);
    assert_eq!(settings.load().await.unwrap(), Settings::with_defaults());

    let custom = Settings {
        page_size: Some(25),
        ..Settings::with_defaults()
    };
    settings.save(&custom).await.unwrap();
    assert_eq!(settings.load().await.unwrap().page_size, Some(25));
}

#[test]
fn test_open_fails_for_unwritable_location() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"file").unwrap();

    let result = tokio_test::block_on(StoreFactory::open(&blocker.join("assetdeck.db")));
    assert!(result.is_err());
}
