//! End-to-end HTTP tests with an in-memory pipeline behind the router.

use std::{
    future::Future,
    pin::Pin,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use ai_llm_service::{
    AiLlmError,
    error_handler::{Operation, ProviderError, ProviderErrorKind},
};
use rag_store::{EmbeddingsProvider, RagError, RagHit, VectorIndex};
use scout_rag::{ChatModel, ScoutBot};
use serde_json::{Value, json};
use tokio::net::TcpListener;

type BoxFut<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

struct OnesEmbedder;

impl EmbeddingsProvider for OnesEmbedder {
    fn embed<'a>(&'a self, _text: &'a str) -> BoxFut<'a, Result<Vec<f32>, RagError>> {
        Box::pin(async { Ok::<_, RagError>(vec![1.0; 3]) })
    }

    fn dimension(&self) -> usize {
        3
    }
}

struct ListIndex(Vec<RagHit>);

impl VectorIndex for ListIndex {
    fn query<'a>(
        &'a self,
        vector: &'a [f32],
        top_k: usize,
    ) -> BoxFut<'a, Result<Vec<RagHit>, RagError>> {
        Box::pin(async move {
            rag_store::check_query(vector, top_k, 3)?;
            Ok(self.0.iter().take(top_k).cloned().collect())
        })
    }

    fn dimension(&self) -> usize {
        3
    }
}

#[derive(Default)]
struct CountingChat {
    calls: AtomicUsize,
    fail: bool,
}

impl ChatModel for CountingChat {
    fn chat<'a>(&'a self, _system: &'a str, user: &'a str) -> BoxFut<'a, Result<String, AiLlmError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AiLlmError::Provider(ProviderError::new(
                    Operation::Chat,
                    ProviderErrorKind::EmptyChoices,
                )));
            }
            Ok::<_, AiLlmError>(format!("echo: {user}"))
        })
    }
}

fn reports() -> Vec<RagHit> {
    vec![
        RagHit::from_metadata(
            "doe-2017",
            0.91,
            json!({"text": "SCOUTING REPORT: John Doe - SS (2017) | Plus arm | Arm 60"}),
        ),
        RagHit::from_metadata(
            "roe-2018",
            0.84,
            json!({"text": "SCOUTING REPORT: Jim Roe - LHP (2018) | Fading changeup | Changeup 60"}),
        ),
    ]
}

async fn serve(hits: Vec<RagHit>, chat: Arc<CountingChat>) -> String {
    let bot = ScoutBot::new(Arc::new(OnesEmbedder), Arc::new(ListIndex(hits)), chat);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let app = api::router(Arc::new(bot));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

async fn post(base: &str, path: &str, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}{path}"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn ask_returns_answer_with_sources() {
    let chat = Arc::new(CountingChat::default());
    let base = serve(reports(), chat.clone()).await;

    let (status, body) = post(
        &base,
        "/ask",
        json!({"question": "Who grades 60?", "show_sources": true}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["kind"], "generated");
    let answer = body["data"]["answer"].as_str().unwrap();
    assert!(answer.contains("John Doe") && answer.contains("Jim Roe"));
    let sources = body["data"]["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 2);
    assert!(sources[0].as_str().unwrap().starts_with("01. [score 0.910]"));
    assert_eq!(chat.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn ask_without_hits_skips_the_model() {
    let chat = Arc::new(CountingChat::default());
    let base = serve(vec![], chat.clone()).await;

    let (status, body) = post(&base, "/ask", json!({"question": "Anyone?"})).await;

    assert_eq!(status, 200);
    assert_eq!(
        body["data"]["answer"],
        "No relevant information found in the vector database."
    );
    assert_eq!(body["data"]["kind"], "no_context");
    assert!(body["data"].get("sources").is_none());
    assert_eq!(chat.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ask_rejects_blank_question_and_zero_top_k() {
    let chat = Arc::new(CountingChat::default());
    let base = serve(reports(), chat.clone()).await;

    let (status, body) = post(&base, "/ask", json!({"question": "   "})).await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, _) = post(&base, "/ask", json!({"question": "Q", "top_k": 0})).await;
    assert_eq!(status, 400);

    let (status, body) = post(&base, "/ask", json!({"top_k": 3})).await;
    assert_eq!(status, 400);
    assert!(body["error"]["hint"].is_string());

    assert_eq!(chat.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn provider_failures_are_bad_gateway() {
    let chat = Arc::new(CountingChat {
        fail: true,
        ..CountingChat::default()
    });
    let base = serve(reports(), chat).await;

    let (status, body) = post(&base, "/ask", json!({"question": "Q"})).await;

    assert_eq!(status, 502);
    assert_eq!(body["error"]["code"], "PROVIDER_ERROR");
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let chat = Arc::new(CountingChat::default());
    let base = serve(reports(), chat.clone()).await;

    let (status, body) = post(&base, "/search", json!({"query": "arm", "top_k": 1})).await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["query"], "arm");
    let results = body["data"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], "doe-2017");
    assert!(results[0].get("metadata").is_none());
    assert_eq!(chat.calls.load(Ordering::SeqCst), 0);

    let (status, _) = post(&base, "/search", json!({"query": ""})).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn search_trims_the_query_like_ask() {
    let chat = Arc::new(CountingChat::default());
    let base = serve(reports(), chat).await;

    let (status, body) = post(&base, "/search", json!({"query": "  arm \n"})).await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["query"], "arm");
    assert_eq!(body["data"]["results"].as_array().unwrap().len(), 2);

    let (status, body) = post(&base, "/search", json!({"query": " \t "})).await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
}
