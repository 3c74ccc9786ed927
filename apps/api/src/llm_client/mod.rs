//! LLM client: the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: no other module may call the Gemini API directly.
//! All provider interactions MUST go through this module.
//!
//! The client performs exactly one provider call per `generate` invocation.
//! Retry policy belongs to the caller (see `crate::retry`); the proxies never
//! retry the provider themselves.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash-preview-09-2025";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned no text content")]
    EmptyContent,
}

/// Conversation role on the Gemini wire. The provider names the assistant
/// side "model", and that value goes over the wire verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One inline base64 attachment. Gemini reads PDFs supplied this way as
/// directly inspectable pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn pdf(base64: impl Into<String>) -> Self {
        Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: "application/pdf".to_string(),
                data: base64.into(),
            }),
        }
    }
}

/// One conversation turn on the wire: `{ "role": ..., "parts": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Content {
            role: Role::User,
            parts: vec![Part::text(text)],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Content {
            role: Role::Model,
            parts: vec![Part::text(text)],
        }
    }

    pub fn user_with_parts(parts: Vec<Part>) -> Self {
        Content {
            role: Role::User,
            parts,
        }
    }

    /// First text part, if any.
    pub fn text(&self) -> Option<&str> {
        self.parts.iter().find_map(|p| p.text.as_deref())
    }
}

/// Advisory structured-output constraints forwarded to the provider.
/// The schema is a hint to the model, not something this service enforces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: &'static str,
    pub response_schema: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: &'a [Content],
    system_instruction: SystemInstruction<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<&'a GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// `candidates[0].content.parts[0].text`, the shape both proxies require.
    fn text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single LLM client shared by all route handlers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Points the client at a different API base (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Makes a single `generateContent` call and extracts the first
    /// candidate's text. Missing credential fails before any network I/O.
    pub async fn generate(
        &self,
        contents: &[Content],
        system: &str,
        generation_config: Option<&GenerationConfig>,
    ) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let request_body = GenerateRequest {
            contents,
            system_instruction: SystemInstruction {
                parts: [TextPart { text: system }],
            },
            generation_config,
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, MODEL, api_key
        );

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Surface the provider's own message when the body parses
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: GenerateResponse = response.json().await?;
        let text = envelope.text().ok_or(LlmError::EmptyContent)?;

        debug!("LLM call succeeded ({} chars)", text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_text_extracts_first_candidate_part() {
        let json = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [{"text": "hello"}, {"text": "ignored"}],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ],
            "usageMetadata": {"promptTokenCount": 10}
        }"#;
        let envelope: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.text().as_deref(), Some("hello"));
    }

    #[test]
    fn envelope_without_candidates_yields_no_text() {
        let envelope: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(envelope.text().is_none());
    }

    #[test]
    fn envelope_with_textless_part_yields_no_text() {
        let json = r#"{"candidates": [{"content": {"parts": [{}]}}]}"#;
        let envelope: GenerateResponse = serde_json::from_str(json).unwrap();
        assert!(envelope.text().is_none());
    }

    #[test]
    fn request_serializes_with_provider_field_names() {
        let contents = [Content::user("hi")];
        let config = GenerationConfig {
            response_mime_type: "application/json",
            response_schema: serde_json::json!({"type": "OBJECT"}),
        };
        let request = GenerateRequest {
            contents: &contents,
            system_instruction: SystemInstruction {
                parts: [TextPart { text: "be nice" }],
            },
            generation_config: Some(&config),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "be nice");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn request_omits_generation_config_when_absent() {
        let contents = [Content::user("hi")];
        let request = GenerateRequest {
            contents: &contents,
            system_instruction: SystemInstruction {
                parts: [TextPart { text: "sys" }],
            },
            generation_config: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn pdf_part_serializes_as_inline_data() {
        let part = Part::pdf("QkFTRTY0");
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value["inlineData"]["mimeType"], "application/pdf");
        assert_eq!(value["inlineData"]["data"], "QkFTRTY0");
        assert!(value.get("text").is_none());
    }

    #[test]
    fn model_role_uses_provider_spelling() {
        let turn = Content::model("reply");
        let value = serde_json::to_value(&turn).unwrap();
        assert_eq!(value["role"], "model");
    }
}
