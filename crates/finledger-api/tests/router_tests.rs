//! Integration tests for the HTTP router
//!
//! Runs the real router over an in-memory store and scripted chat
//! providers; no network, no filesystem.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use finledger_api::{create_router, AppState};
use finledger_assistant::{
    AssistantError, ChatProvider, ChatReply, Gateway, GREETING_RESPONSE, SIGNATURE,
};
use finledger_config::Config;
use finledger_core::{LedgerStore, MemoryStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;

struct ScriptedProvider {
    reply: Result<String, ()>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn ok(content: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(content.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(()),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn complete(&self, _system: &str, _user: &str) -> Result<ChatReply, AssistantError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(content) => Ok(ChatReply {
                content: content.clone(),
                usage: None,
            }),
            Err(()) => Err(AssistantError::Network("Request timed out".to_string())),
        }
    }
}

fn app(provider: Option<Arc<dyn ChatProvider>>) -> Router {
    let store = LedgerStore::open(Box::new(MemoryStore::new()));
    let state = AppState {
        store: Arc::new(RwLock::new(store)),
        gateway: Arc::new(Gateway::new(provider)),
        config: Config::default(),
    };
    create_router(state)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// ==================== Health and page ====================

#[tokio::test]
async fn health_reports_ok_with_timestamp() {
    let response = app(None).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn root_serves_the_page() {
    let response = app(None).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("/api/assistant"));
}

// ==================== Assistant endpoint ====================

#[tokio::test]
async fn missing_message_returns_400() {
    let response = app(None)
        .oneshot(post_json("/api/assistant", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_message_returns_400() {
    let response = app(None)
        .oneshot(post_json(
            "/api/assistant",
            serde_json::json!({ "message": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn whitespace_message_gets_the_greeting() {
    let provider = ScriptedProvider::ok("unused");
    let router = app(Some(provider.clone() as Arc<dyn ChatProvider>));

    let response = router
        .oneshot(post_json(
            "/api/assistant",
            serde_json::json!({ "message": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], GREETING_RESPONSE);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn greeting_short_circuits_without_provider_call() {
    let provider = ScriptedProvider::ok("unused");
    let router = app(Some(provider.clone() as Arc<dyn ChatProvider>));

    let response = router
        .oneshot(post_json(
            "/api/assistant",
            serde_json::json!({ "message": "oi" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], GREETING_RESPONSE);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_credential_returns_500() {
    let response = app(None)
        .oneshot(post_json(
            "/api/assistant",
            serde_json::json!({ "message": "quero economizar" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn provider_failure_returns_200_with_fallback() {
    let router = app(Some(ScriptedProvider::failing() as Arc<dyn ChatProvider>));
    let response = router
        .oneshot(post_json(
            "/api/assistant",
            serde_json::json!({
                "message": "economizar",
                "financialData": {
                    "balance": 59.5, "income": 100.0,
                    "expense": 40.5, "transactionCount": 2
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    let text = body["response"].as_str().unwrap();
    assert!(text.contains("Dica para economizar"));
    assert!(text.ends_with(SIGNATURE));
    assert!(body["error"].as_str().unwrap().contains("fallback"));
}

#[tokio::test]
async fn provider_success_passes_text_through() {
    let router = app(Some(ScriptedProvider::ok("Guarde 10% do salário.") as Arc<dyn ChatProvider>));
    let response = router
        .oneshot(post_json(
            "/api/assistant",
            serde_json::json!({ "message": "quero economizar" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert!(body["response"]
        .as_str()
        .unwrap()
        .starts_with("Guarde 10% do salário."));
}

// ==================== Ledger endpoints ====================

#[tokio::test]
async fn transaction_lifecycle() {
    let router = app(None);

    // Empty ledger
    let response = router.clone().oneshot(get("/api/transactions")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["total_count"], 0);
    assert_eq!(body["totals"]["balance"], 0.0);

    // Add income then expense
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/transactions",
            serde_json::json!({
                "kind": "income", "amount": "100.00",
                "description": "Salary", "category": "salary"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/transactions",
            serde_json::json!({
                "kind": "expense", "amount": 40.5,
                "description": "Lunch", "category": "food"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Newest first, totals exact
    let response = router.clone().oneshot(get("/api/transactions")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["total_count"], 2);
    assert_eq!(body["transactions"][0]["description"], "Lunch");
    assert_eq!(body["transactions"][1]["description"], "Salary");
    assert_eq!(body["totals"]["income"], 100.0);
    assert_eq!(body["totals"]["expense"], 40.5);
    assert_eq!(body["totals"]["balance"], 59.5);

    // Summary matches
    let response = router.clone().oneshot(get("/api/summary")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["count"], 2);

    // Export carries the header row and quoted fields
    let response = router.clone().oneshot(get("/api/export")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("transacoes-"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(csv.starts_with("Date,Description,Category,Kind,Amount\n"));
    assert!(csv.contains("\"Lunch\",\"food\",\"expense\",\"40.50\""));
    assert!(csv.contains("\"Salary\",\"salary\",\"income\",\"100.00\""));

    // Clear refuses without confirmation
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/transactions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Clear with confirmation empties the ledger
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/transactions?confirm=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router.clone().oneshot(get("/api/summary")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["balance"], 0.0);
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let router = app(None);

    // Unknown kind
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/transactions",
            serde_json::json!({ "kind": "transfer", "amount": 1, "description": "x" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Empty description
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/transactions",
            serde_json::json!({ "kind": "income", "amount": 1, "description": "  " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Non-numeric amount
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/transactions",
            serde_json::json!({ "kind": "income", "amount": "abc", "description": "x" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was recorded
    let response = router.oneshot(get("/api/summary")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn export_of_empty_ledger_returns_400() {
    let response = app(None).oneshot(get("/api/export")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
