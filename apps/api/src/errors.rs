use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Wire shape: `{ "error": <message> }`, plus `"details"` when something was
/// recovered from the provider's error body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Llm(LlmError::MissingApiKey) => {
                tracing::error!("GEMINI_API_KEY environment variable is not set");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "API key not configured. Please set GEMINI_API_KEY in the server environment."
                        .to_string(),
                    None,
                )
            }
            AppError::Llm(LlmError::Api { status, message }) => {
                tracing::error!("Provider error (status {status}): {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Google API error! status: {status}"),
                    Some(message.clone()),
                )
            }
            AppError::Llm(LlmError::Http(e)) => {
                tracing::error!("Provider transport error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to reach the AI provider".to_string(),
                    Some(e.to_string()),
                )
            }
            AppError::Llm(LlmError::EmptyContent) => {
                tracing::error!("Provider response lacked a text part");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Invalid response structure from Google API.".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred processing your request".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({ "error": message });
        if let Some(details) = details {
            body["details"] = json!(details);
        }

        (status, Json(body)).into_response()
    }
}
