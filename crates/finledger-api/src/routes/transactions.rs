//! Ledger endpoints - JSON API
//!
//! Endpoints:
//! - api_transactions: full list plus totals (JSON)
//! - api_transaction_create: record a new transaction
//! - api_transactions_clear: bulk clear, gated on explicit confirmation
//! - api_summary: aggregate totals only
//! - api_export: CSV download of the full ledger

use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Local;
use finledger_core::{Totals, Transaction, TransactionKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Ledger list response
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
    pub total_count: usize,
}

/// Request body for `POST /api/transactions`
#[derive(Debug, Deserialize)]
pub struct NewTransaction {
    pub kind: String,
    /// Accepted as a JSON number or as raw form text
    pub amount: serde_json::Value,
    pub description: String,
    #[serde(default)]
    pub category: String,
}

/// Get the full ledger with totals (JSON API)
pub async fn api_transactions(
    State(state): State<AppState>,
) -> Json<TransactionsResponse> {
    let store = state.store.read().await;
    Json(TransactionsResponse {
        transactions: store.transactions().to_vec(),
        totals: store.totals(),
        total_count: store.len(),
    })
}

/// Record a new transaction (JSON API)
pub async fn api_transaction_create(
    State(state): State<AppState>,
    Json(body): Json<NewTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = TransactionKind::from_str(&body.kind).map_err(|message| {
        ApiError::BadRequest { message }
    })?;

    let amount = match &body.amount {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.clone(),
        _ => {
            return Err(ApiError::BadRequest {
                message: "Amount must be a number".to_string(),
            })
        }
    };

    let mut store = state.store.write().await;
    let transaction = store.add(kind, &amount, &body.description, &body.category)?;
    log::info!(
        "Recorded {} of {:.2} ({})",
        transaction.kind,
        transaction.amount,
        transaction.description
    );

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Bulk-clear the ledger. Requires `?confirm=true`; the UI asks the
/// user before sending it.
pub async fn api_transactions_clear(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let confirmed = params
        .get("confirm")
        .map(|v| v == "true")
        .unwrap_or(false);

    let mut store = state.store.write().await;
    store.clear(confirmed)?;
    log::info!("Ledger cleared");

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Aggregate totals only (JSON API)
pub async fn api_summary(State(state): State<AppState>) -> Json<Totals> {
    let store = state.store.read().await;
    Json(store.totals())
}

/// Download the full ledger as CSV, named with the current date
pub async fn api_export(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.read().await;
    let csv = store.export_csv()?;

    let filename = format!("transacoes-{}.csv", Local::now().format("%Y-%m-%d"));
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    Ok((headers, csv))
}
