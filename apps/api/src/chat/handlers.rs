//! Axum route handler for the chat proxy.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chat::{prompts, Language};
use crate::errors::AppError;
use crate::llm_client::{Content, Part};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub user_query: String,
    /// Prior conversation, not including the new message. Required: a request
    /// without it is rejected at deserialization.
    pub history: Vec<Content>,
    #[serde(default)]
    pub pdf_base64: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/v1/chat
///
/// Appends the new user turn (with the optional PDF attached as inline data)
/// to the supplied history and forwards the full sequence under the locale's
/// system instruction. Exactly one reply turn comes back, wrapped in a
/// `{ reply }` envelope; any provider or shape failure becomes a structured
/// error, never partial text.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.user_query.trim().is_empty() {
        return Err(AppError::Validation("Missing userQuery".to_string()));
    }

    let language = Language::from_tag(request.language.as_deref().unwrap_or_default());
    let system = prompts::system_prompt(language);

    let mut parts = vec![Part::text(request.user_query)];
    if let Some(pdf_base64) = request.pdf_base64 {
        parts.push(Part::pdf(pdf_base64));
    }

    let mut contents = request.history;
    contents.push(Content::user_with_parts(parts));

    let reply = state.llm.generate(&contents, system, None).await?;

    info!("Chat reply generated ({} chars)", reply.len());

    Ok(Json(ChatResponse { reply }))
}
