//! RagStore against an in-process fake of the Pinecone REST API.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use rag_store::{RagConfig, RagError, RagStore, VectorIndex};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Seen {
    queries: Arc<Mutex<Vec<Value>>>,
    api_keys: Arc<Mutex<Vec<String>>>,
}

async fn spawn_fake(dimension: usize, cloud: &str) -> (String, Seen) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let seen = Seen::default();

    let indexes = json!({
        "indexes": [
            {
                "name": "other-index",
                "dimension": 8,
                "metric": "cosine",
                "host": base.clone(),
                "spec": { "serverless": { "cloud": "aws", "region": "us-east-1" } },
                "status": { "ready": true, "state": "Ready" }
            },
            {
                "name": "scout-reports-index",
                "dimension": dimension,
                "metric": "cosine",
                "host": base.clone(),
                "spec": { "serverless": { "cloud": cloud, "region": "us-east-1" } },
                "status": { "ready": true, "state": "Ready" }
            }
        ]
    });

    let app = Router::new()
        .route(
            "/indexes",
            get(move |State(seen): State<Seen>, headers: HeaderMap| {
                let indexes = indexes.clone();
                async move {
                    let key = headers
                        .get("Api-Key")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    seen.api_keys.lock().unwrap().push(key);
                    Json(indexes)
                }
            }),
        )
        .route(
            "/query",
            post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                seen.queries.lock().unwrap().push(body);
                // Deliberately out of order; the store must rank them.
                Json(json!({
                    "matches": [
                        { "id": "r2", "score": 0.41, "metadata": { "text": "Roe, RHP. Fastball sits 95." } },
                        { "id": "r1", "score": 0.87, "metadata": { "text": "Doe, SS. Plus arm, 60 speed." } },
                        { "id": "r3", "score": 0.41, "metadata": { "source": "no text field" } }
                    ],
                    "namespace": ""
                }))
            }),
        )
        .with_state(seen.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base, seen)
}

fn cfg(base: &str, index: &str) -> RagConfig {
    let mut cfg = RagConfig::new_default("pc-test-key");
    cfg.controller_url = base.to_string();
    cfg.index_name = index.to_string();
    cfg
}

#[tokio::test]
async fn connect_reads_dimension_from_index() {
    let (base, seen) = spawn_fake(4, "aws").await;
    let store = RagStore::connect(cfg(&base, "scout-reports-index"))
        .await
        .unwrap();

    assert_eq!(store.dimension(), 4);
    assert_eq!(store.index_name(), "scout-reports-index");
    assert_eq!(seen.api_keys.lock().unwrap().as_slice(), ["pc-test-key"]);
}

#[tokio::test]
async fn missing_index_is_reported_with_available_names() {
    let (base, _) = spawn_fake(4, "aws").await;
    let err = match RagStore::connect(cfg(&base, "nope")).await {
        Ok(_) => panic!("connect must fail for an unknown index"),
        Err(e) => e,
    };

    assert!(err.is_config());
    match err {
        RagError::IndexNotFound { name, available } => {
            assert_eq!(name, "nope");
            assert_eq!(available, ["other-index", "scout-reports-index"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn location_mismatch_only_warns() {
    let (base, _) = spawn_fake(4, "gcp").await;
    let store = RagStore::connect(cfg(&base, "scout-reports-index")).await;
    assert!(store.is_ok());
}

#[tokio::test]
async fn query_sends_pinecone_body_and_ranks_hits() {
    let (base, seen) = spawn_fake(4, "aws").await;
    let mut c = cfg(&base, "scout-reports-index");
    c.namespace = Some("reports".into());
    let store = RagStore::connect(c).await.unwrap();

    let hits = store.query(&[0.1, 0.2, 0.3, 0.4], 3).await.unwrap();

    let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, ["r1", "r2", "r3"]);
    assert_eq!(hits[0].text, "Doe, SS. Plus arm, 60 speed.");
    assert_eq!(hits[2].text, "");

    let queries = seen.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    let body = &queries[0];
    assert_eq!(body["topK"], 3);
    assert_eq!(body["includeMetadata"], true);
    assert_eq!(body["includeValues"], false);
    assert_eq!(body["namespace"], "reports");
    assert_eq!(body["vector"].as_array().map(|v| v.len()), Some(4));
}

#[tokio::test]
async fn repeated_queries_return_the_same_hits() {
    let (base, _) = spawn_fake(2, "aws").await;
    let store = RagStore::connect(cfg(&base, "scout-reports-index"))
        .await
        .unwrap();

    let a = store.search_by_vector(&[1.0, 0.0], 2).await.unwrap();
    let b = store.search_by_vector(&[1.0, 0.0], 2).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn bad_queries_fail_before_any_request() {
    let (base, seen) = spawn_fake(4, "aws").await;
    let store = RagStore::connect(cfg(&base, "scout-reports-index"))
        .await
        .unwrap();

    assert!(matches!(
        store.search_by_vector(&[0.0; 4], 0).await,
        Err(RagError::InvalidTopK)
    ));
    assert!(matches!(
        store.search_by_vector(&[0.0; 3], 2).await,
        Err(RagError::VectorSizeMismatch { got: 3, want: 4 })
    ));
    assert!(seen.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn control_plane_errors_surface_as_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let app = Router::new().route(
        "/indexes",
        get(|| async { (StatusCode::UNAUTHORIZED, "Invalid API Key") }),
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    match RagStore::connect(cfg(&base, "scout-reports-index")).await {
        Err(RagError::Status { status, snippet, .. }) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(snippet.contains("Invalid API Key"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("connect must fail on 401"),
    }
}
