//! Axum route handler for the plan proxy.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::chat::Language;
use crate::errors::AppError;
use crate::llm_client::{Content, GenerationConfig};
use crate::plan::prompts;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    #[serde(default)]
    pub user_query: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// POST /api/v1/plan
///
/// Wraps the intake summary as a single user turn under the fixed plan
/// instruction and advisory schema, then relays the provider's raw JSON text
/// verbatim. The caller parses it; this proxy performs no repair and makes
/// exactly one provider call.
pub async fn handle_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Response, AppError> {
    if request.user_query.trim().is_empty() {
        return Err(AppError::Validation("Missing userQuery".to_string()));
    }

    let language = Language::from_tag(request.language.as_deref().unwrap_or_default());
    let system = prompts::system_prompt(language);
    let generation_config = GenerationConfig {
        response_mime_type: "application/json",
        response_schema: prompts::tax_plan_schema(),
    };

    let contents = [Content::user(request.user_query)];
    let text = state
        .llm
        .generate(&contents, &system, Some(&generation_config))
        .await?;

    info!("Plan generated ({} chars)", text.len());

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        text,
    )
        .into_response())
}
