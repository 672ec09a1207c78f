//! Error types for finledger-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use finledger_assistant::AssistantError;
use finledger_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Provider API key is not configured")]
    MissingCredential,

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation { message } => ApiError::BadRequest { message },
            CoreError::EmptyLedger => ApiError::BadRequest {
                message: error.to_string(),
            },
            CoreError::Storage { .. } | CoreError::Serialization { .. } => {
                log::error!("Store failure: {}", error);
                ApiError::InternalError
            }
        }
    }
}

impl From<AssistantError> for ApiError {
    fn from(error: AssistantError) -> Self {
        match error {
            AssistantError::EmptyMessage => ApiError::BadRequest {
                message: error.to_string(),
            },
            AssistantError::MissingApiKey => ApiError::MissingCredential,
            // Provider failures degrade to fallback inside the gateway;
            // reaching here means a programming error
            _ => {
                log::error!("Unexpected assistant failure: {}", error);
                ApiError::InternalError
            }
        }
    }
}
