//! HTTP API server for finledger
//!
//! Routes are organized into modules:
//! - routes::transactions: ledger list, create, clear, summary, export
//! - routes::assistant: assistant gateway endpoint
//! - routes::page: embedded single-page UI

pub mod error;
pub mod routes;

use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use finledger_assistant::Gateway;
use finledger_config::Config;
use finledger_core::LedgerStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state, explicitly injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<LedgerStore>>,
    pub gateway: Arc<Gateway>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::assistant::api_assistant;
    use routes::page::index_page;
    use routes::transactions::{
        api_export, api_summary, api_transaction_create, api_transactions,
        api_transactions_clear,
    };

    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health_check))
        .route("/api/assistant", post(api_assistant))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions", post(api_transaction_create))
        .route("/api/transactions", delete(api_transactions_clear))
        .route("/api/summary", get(api_summary))
        .route("/api/export", get(api_export))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "message": "FinAssistant está rodando!",
        "author": "FinAssistant",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Start the HTTP server.
///
/// Binds the configured address, logs the available routes, and serves
/// until the process ends.
pub async fn start_server(config: Config, state: AppState) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting finledger server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (single-page UI)");
    log::info!("  - /health");
    log::info!("  - /api/assistant (POST)");
    log::info!("  - /api/transactions (GET/POST/DELETE)");
    log::info!("  - /api/summary, /api/export");

    match axum::serve(listener, router).await {
        Ok(_) => log::info!("Server stopped gracefully"),
        Err(e) => log::error!("Server error: {}", e),
    }
    Ok(())
}
