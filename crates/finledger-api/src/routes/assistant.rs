//! Assistant endpoint - forwards questions to the gateway

use crate::error::ApiError;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use finledger_assistant::{AssistantReply, FinancialSnapshot};
use serde::Deserialize;

/// Request body for `POST /api/assistant`
#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    /// Free-text question; absent or the empty string is a client
    /// error, but a whitespace-only message reaches the gateway and
    /// gets the greeting
    #[serde(default)]
    pub message: Option<String>,
    /// Optional snapshot of the computed totals
    #[serde(rename = "financialData", default)]
    pub financial_data: Option<FinancialSnapshot>,
}

/// Answer a user question, degrading to the rule-based fallback when
/// the external provider call fails. The response is always
/// success-shaped except for missing message (400) and missing
/// credential (500).
pub async fn api_assistant(
    State(state): State<AppState>,
    Json(request): Json<AssistantRequest>,
) -> Result<Json<AssistantReply>, ApiError> {
    let message = request.message.as_deref().ok_or_else(|| ApiError::BadRequest {
        message: "Message is required".to_string(),
    })?;

    let reply = state
        .gateway
        .handle(message, request.financial_data.as_ref())
        .await?;

    Ok(Json(reply))
}
