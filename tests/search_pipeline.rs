//! End-to-end pipeline tests: engine facade, tiered search, rehydration.
//!
//! Drives `SearchSync` against a mock HTTP backend and an in-memory system
//! of record. Strict and fuzzy requests are told apart by the presence of
//! the fuzziness parameters in the request body.
//!
//! Run with: `cargo test --test search_pipeline`

use httpmock::prelude::*;
use httpmock::Method::HEAD;
use serde_json::{json, Map, Value};

use search_sync::schema::FieldDeclaration;
use search_sync::{
    DocumentId, Identified, MemoryStore, Searchable, SearchSync, SearchSyncConfig, SyncError,
};

#[derive(Debug, Clone, PartialEq)]
struct User {
    id: i64,
    name: String,
    email: String,
}

impl Identified for User {
    fn record_id(&self) -> DocumentId {
        DocumentId::Int(self.id)
    }
}

impl Searchable for User {
    fn index_name() -> &'static str {
        "users"
    }

    fn field_declarations() -> Vec<FieldDeclaration> {
        vec![
            FieldDeclaration::text("name")
                .analyzer("autocomplete")
                .search_analyzer("autocomplete_search"),
            FieldDeclaration::text("email"),
        ]
    }

    fn attributes(&self) -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("name".into(), json!(self.name));
        m.insert("email".into(), json!(self.email));
        // Never declared, must never reach the backend
        m.insert("password_hash".into(), json!("supersecret"));
        m
    }
}

fn engine_for(server: &MockServer) -> SearchSync {
    let config = SearchSyncConfig {
        host: server.host(),
        port: server.port(),
        ..Default::default()
    };
    SearchSync::new(config).unwrap()
}

fn user(id: i64, name: &str) -> User {
    User {
        id,
        name: name.into(),
        email: format!("{}@example.com", name),
    }
}

fn hits_body(ids: &[&str]) -> Value {
    let hits: Vec<Value> = ids
        .iter()
        .enumerate()
        .map(|(rank, id)| json!({"_id": id, "_score": 10.0 - rank as f64}))
        .collect();
    json!({"hits": {"total": {"value": ids.len()}, "hits": hits}})
}

// =============================================================================
// Sync direction
// =============================================================================

#[tokio::test]
async fn sync_pushes_allow_listed_projection_only() {
    let server = MockServer::start();
    let upsert = server.mock(|when, then| {
        when.method(PUT).path("/users/_doc/1").json_body(json!({
            "name": "alice",
            "email": "alice@example.com"
        }));
        then.status(201).json_body(json!({"result": "created"}));
    });

    let engine = engine_for(&server);
    engine.sync(&user(1, "alice")).await.unwrap();

    // Exact body match above proves password_hash was projected away
    upsert.assert();
}

#[tokio::test]
async fn sync_partial_drops_undeclared_fields() {
    let server = MockServer::start();
    let update = server.mock(|when, then| {
        when.method(POST)
            .path("/users/_update/1")
            .json_body(json!({"doc": {"name": "bob"}}));
        then.status(200).json_body(json!({"result": "updated"}));
    });

    let engine = engine_for(&server);
    let mut fields = Map::new();
    fields.insert("name".into(), json!("bob"));
    fields.insert("password_hash".into(), json!("sneaky"));

    engine
        .sync_partial::<User>(&DocumentId::Int(1), fields)
        .await
        .unwrap();
    update.assert();
}

#[tokio::test]
async fn sync_partial_with_no_declared_fields_skips_network() {
    let server = MockServer::start();
    let any_request = server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });

    let engine = engine_for(&server);
    let mut fields = Map::new();
    fields.insert("password_hash".into(), json!("sneaky"));

    engine
        .sync_partial::<User>(&DocumentId::Int(1), fields)
        .await
        .unwrap();
    assert_eq!(any_request.hits(), 0);
}

#[tokio::test]
async fn sync_all_reports_per_item_outcomes() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/users/_bulk");
        then.status(200).json_body(json!({
            "errors": false,
            "items": [
                {"index": {"_id": "1", "status": 201}},
                {"index": {"_id": "2", "status": 201}}
            ]
        }));
    });

    let engine = engine_for(&server);
    let users = vec![user(1, "alice"), user(2, "bob")];
    let outcomes = engine.sync_all(&users).await.unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.succeeded()));
}

#[tokio::test]
async fn create_index_registers_descriptor() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(HEAD).path("/users");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(PUT).path("/users");
        then.status(200).json_body(json!({"acknowledged": true}));
    });

    let engine = engine_for(&server);
    assert!(engine.create_index::<User>().await.unwrap());
    assert!(engine.registered_descriptor("users").is_some());
}

// =============================================================================
// Query direction
// =============================================================================

#[tokio::test]
async fn smart_search_returns_strict_hits_without_fallback() {
    let server = MockServer::start();
    let strict = server.mock(|when, then| {
        when.method(POST)
            .path("/users/_search")
            .body_excludes("fuzziness");
        then.status(200).json_body(hits_body(&["9", "10", "3"]));
    });
    let fuzzy = server.mock(|when, then| {
        when.method(POST)
            .path("/users/_search")
            .body_includes("fuzziness");
        then.status(200).json_body(hits_body(&["1"]));
    });

    let engine = engine_for(&server);
    let hits = engine.smart_search::<User>("alice").await.unwrap();

    let ids: Vec<DocumentId> = hits.into_iter().map(|h| h.id).collect();
    assert_eq!(
        ids,
        vec![DocumentId::Int(9), DocumentId::Int(10), DocumentId::Int(3)]
    );
    strict.assert();
    assert_eq!(fuzzy.hits(), 0);
}

#[tokio::test]
async fn smart_search_falls_back_to_fuzzy_on_zero_hits() {
    let server = MockServer::start();
    let strict = server.mock(|when, then| {
        when.method(POST)
            .path("/users/_search")
            .body_excludes("fuzziness");
        then.status(200).json_body(hits_body(&[]));
    });
    let fuzzy = server.mock(|when, then| {
        when.method(POST)
            .path("/users/_search")
            .body_includes(r#""fuzziness":1"#)
            .body_includes(r#""prefix_length":2"#)
            .body_includes(r#""max_expansions":20"#);
        then.status(200).json_body(hits_body(&["4", "8"]));
    });

    let engine = engine_for(&server);
    let hits = engine.smart_search::<User>("alcie").await.unwrap();

    let ids: Vec<DocumentId> = hits.into_iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![DocumentId::Int(4), DocumentId::Int(8)]);
    strict.assert();
    fuzzy.assert();
}

#[tokio::test]
async fn smart_search_empty_on_both_tiers_is_success() {
    let server = MockServer::start();
    let strict = server.mock(|when, then| {
        when.method(POST)
            .path("/users/_search")
            .body_excludes("fuzziness");
        then.status(200).json_body(hits_body(&[]));
    });
    let fuzzy = server.mock(|when, then| {
        when.method(POST)
            .path("/users/_search")
            .body_includes("fuzziness");
        then.status(200).json_body(hits_body(&[]));
    });

    let engine = engine_for(&server);
    let hits = engine.smart_search::<User>("zzz").await.unwrap();

    assert!(hits.is_empty());
    strict.assert();
    fuzzy.assert();
}

#[tokio::test]
async fn smart_search_surfaces_backend_rejection_without_fallback() {
    let server = MockServer::start();
    let strict = server.mock(|when, then| {
        when.method(POST)
            .path("/users/_search")
            .body_excludes("fuzziness");
        then.status(400)
            .json_body(json!({"error": {"type": "parsing_exception"}}));
    });
    let fuzzy = server.mock(|when, then| {
        when.method(POST)
            .path("/users/_search")
            .body_includes("fuzziness");
        then.status(200).json_body(hits_body(&["1"]));
    });

    let engine = engine_for(&server);
    match engine.smart_search::<User>("alice").await {
        Err(SyncError::BackendRejection { status, detail }) => {
            assert_eq!(status, 400);
            assert!(detail.contains("parsing_exception"));
        }
        other => panic!("expected BackendRejection, got {:?}", other),
    }
    // A failed strict attempt is not a zero-hit attempt
    strict.assert();
    assert_eq!(fuzzy.hits(), 0);
}

// =============================================================================
// Full pipeline: search + rehydrate
// =============================================================================

#[tokio::test]
async fn find_rehydrates_in_relevance_order() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/users/_search")
            .body_excludes("fuzziness");
        then.status(200).json_body(hits_body(&["9", "10", "3"]));
    });

    let store = MemoryStore::new();
    // Store insertion order deliberately differs from relevance order
    store.insert(user(3, "carol"));
    store.insert(user(9, "alice"));
    store.insert(user(10, "bob"));

    let engine = engine_for(&server);
    let records = engine.find::<User, _>(&store, "a").await.unwrap();

    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![9, 10, 3]);
}

#[tokio::test]
async fn find_skips_ids_missing_from_the_store() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/users/_search")
            .body_excludes("fuzziness");
        then.status(200).json_body(hits_body(&["9", "77", "3"]));
    });

    let store = MemoryStore::new();
    store.insert(user(3, "carol"));
    store.insert(user(9, "alice"));
    // 77 is indexed but gone from the system of record

    let engine = engine_for(&server);
    let records = engine.find::<User, _>(&store, "a").await.unwrap();

    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![9, 3]);
}
