//! Browser-equivalent API client: calls the two proxy endpoints through the
//! backoff wrapper and decodes their differing success bodies.
//!
//! The split matters because the endpoints return different content types:
//! the plan endpoint relays raw TaxPlan JSON text, the chat endpoint wraps
//! its reply in a `{ reply }` envelope. The retry wrapper hands back the raw
//! response on success and the caller decides how to decode it, so a parse
//! failure is a distinct, never-retried error category.

use reqwest::Client;
use serde_json::json;
use thiserror::Error;

use crate::chat::{FormSession, Language};
use crate::plan::{parse_plan, TaxPlan};
use crate::retry::{with_backoff, BackoffPolicy};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    /// The plan endpoint's relayed text failed to parse as a TaxPlan, the
    /// client-side "format" category. The user is returned to the intake
    /// screen; no partial plan is ever shown.
    #[error("The AI response was not in the correct format. Please try again.")]
    Format(#[source] serde_json::Error),

    #[error("Invalid response structure from API.")]
    MissingReply,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    backoff: BackoffPolicy,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            backoff: BackoffPolicy::default(),
        }
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sends one POST through the backoff wrapper. Transport failures and
    /// non-success statuses are retried uniformly on the doubling schedule;
    /// the successful raw response is handed back undecoded.
    async fn post_with_backoff(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let url = &url;
        let http = &self.http;

        with_backoff(self.backoff, move || {
            let (url, http, body) = (url, http, body);
            async move {
                let response = http.post(url).json(body).send().await?;
                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(ClientError::Status {
                        status: status.as_u16(),
                        body,
                    });
                }
                Ok(response)
            }
        })
        .await
    }

    /// Requests a filing plan for the intake summary. The response body is
    /// raw JSON text; parsing it into a [`TaxPlan`] here is the only schema
    /// check in the system.
    pub async fn request_plan(
        &self,
        user_query: &str,
        language: Language,
    ) -> Result<TaxPlan, ClientError> {
        let body = json!({ "userQuery": user_query, "language": language });
        let response = self.post_with_backoff("/api/v1/plan", &body).await?;
        let text = response.text().await?;
        parse_plan(&text).map_err(ClientError::Format)
    }

    /// Sends one chat turn for the session (preamble re-injected by the
    /// session itself) and returns the reply text.
    pub async fn request_chat_reply(
        &self,
        session: &FormSession,
        user_query: &str,
        pdf_base64: Option<&str>,
        language: Language,
    ) -> Result<String, ClientError> {
        let mut body = json!({
            "userQuery": user_query,
            "history": session.request_history(),
            "language": language,
        });
        if let Some(pdf) = pdf_base64 {
            body["pdfBase64"] = json!(pdf);
        }

        let response = self.post_with_backoff("/api/v1/chat", &body).await?;
        let envelope: serde_json::Value = response.json().await?;
        envelope
            .get("reply")
            .and_then(|reply| reply.as_str())
            .map(str::to_owned)
            .ok_or(ClientError::MissingReply)
    }
}
