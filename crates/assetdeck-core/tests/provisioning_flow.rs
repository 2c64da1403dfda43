//! Integration tests for the browse, select and provision flow.
//!
//! Drives the public API the way the CLI does: project the catalog, select
//! from the visible page, run the workflow on paused time and read back the
//! playground keys.

use std::sync::Arc;
use std::time::Duration;

use assetdeck_core::services::keys;
use assetdeck_core::{
    AssetCatalog, AssetKey, CatalogQuery, ChannelEmitter, FilterAttribute, InMemoryKeyValueStore,
    KeyValueStore, SelectionStore, Settings, SettingsStore, SettingsUpdate, SortDirection,
    SortKey, TokioScheduler, UserProfile, WorkflowEngine, WorkflowEvent, WorkflowKind,
    WorkflowState,
};

// ── Helpers ─────────────────────────────────────────────────────────

const CATALOG_JSON: &str = r#"{
    "models": [
        {
            "id": "m-1",
            "name": "alpha-chat",
            "slug": "alpha-chat",
            "internalEndpoint": "http://alpha.svc/v1",
            "internalToken": "tok-alpha",
            "details": {"keywords": ["chat"], "status": "Running", "version": "1.2.0"}
        },
        {
            "id": "m-2",
            "name": "beta-code",
            "slug": "beta-code",
            "internalEndpoint": "http://beta.svc/v1",
            "details": {"keywords": ["code"], "status": "Running", "version": "1.10.0"}
        }
    ],
    "mcpServers": [
        {"id": "fs", "name": "Filesystem", "slug": "filesystem", "tools": ["read_file", "write_file"]}
    ]
}"#;

struct Fixture {
    engine: WorkflowEngine,
    store: Arc<InMemoryKeyValueStore>,
    events: tokio::sync::mpsc::UnboundedReceiver<WorkflowEvent>,
}

fn fixture(settings: Settings) -> Fixture {
    let catalog = Arc::new(AssetCatalog::from_json(CATALOG_JSON).expect("catalog parses"));
    let store = Arc::new(InMemoryKeyValueStore::new());
    let selection = Arc::new(SelectionStore::new(catalog, store.clone()));
    let (emitter, events) = ChannelEmitter::new();
    let engine = WorkflowEngine::new(
        selection,
        Arc::new(TokioScheduler::current()),
        Arc::new(emitter),
        settings,
    );
    Fixture {
        engine,
        store,
        events,
    }
}

fn fast_settings() -> Settings {
    Settings {
        step_delay_ms: Some(100),
        settle_delay_ms: Some(50),
        ..Settings::with_defaults()
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_select_from_projection_and_provision() {
    let mut fx = fixture(fast_settings());
    let catalog = Arc::clone(fx.engine.selection().catalog());

    let mut query = CatalogQuery::new(10);
    query.set_sort(SortKey::Version, SortDirection::Descending);
    let view = query.project(catalog.models());
    let ids: Vec<_> = view.page.items.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m-2", "m-1"]);

    fx.engine
        .selection()
        .select_all(view.page.items.iter().map(|m| AssetKey::model(&m.id)));
    fx.engine.selection().toggle(AssetKey::mcp_server("fs"));

    let run = fx.engine.start(WorkflowKind::ConfigurePlayground).unwrap();
    assert_eq!(run.steps[0].label, "Verifying alpha-chat, beta-code, Filesystem details");

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(fx.engine.state(), WorkflowState::Completed);

    let snapshot = fx.engine.selection().playground().snapshot().await.unwrap();
    let persisted: Vec<_> = snapshot.playground_models.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(persisted, vec!["m-1", "m-2"]);
    assert_eq!(snapshot.playground_models[0].token, "tok-alpha");
    assert_eq!(snapshot.playground_mcp_servers, vec!["Filesystem"]);
    assert_eq!(snapshot.user_profile, UserProfile::AiEngineer);

    let mut terminal = None;
    while let Ok(event) = fx.events.try_recv() {
        if event.is_terminal() {
            terminal = Some(event);
        }
    }
    assert!(matches!(terminal, Some(WorkflowEvent::Completed { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_second_run_does_not_duplicate_records() {
    let fx = fixture(fast_settings());

    for _ in 0..2 {
        fx.engine.selection().select_all([AssetKey::model("m-1")]);
        fx.engine.start(WorkflowKind::CreateEndpoint).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(fx.engine.state(), WorkflowState::Completed);
    }

    let raw = fx.store.get(keys::MODELS_WITH_ENDPOINTS).await.unwrap();
    assert_eq!(raw.as_deref(), Some(r#"["m-1"]"#));
}

#[tokio::test(start_paused = true)]
async fn test_filter_narrowing_returns_to_first_page() {
    let fx = fixture(fast_settings());
    let catalog = fx.engine.selection().catalog();

    let mut query = CatalogQuery::new(1);
    query.set_page(2);
    assert_eq!(query.project(catalog.models()).page.items[0].id, "m-2");

    query.add_filter(FilterAttribute::Keyword, "CHAT");
    let view = query.project(catalog.models());
    assert_eq!(view.page.page, 1);
    assert_eq!(view.page.items.len(), 1);
    assert_eq!(view.page.items[0].id, "m-1");
}

#[tokio::test]
async fn test_settings_round_trip_through_store() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let settings = SettingsStore::new(store.clone());

    let updated = settings
        .update(&SettingsUpdate {
            settle_delay_ms: Some(Some(0)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.effective_settle_delay_ms(), 0);
    assert!(store.get(keys::APP_SETTINGS).await.unwrap().is_some());
}
