use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Both proxies are stateless per invocation; the only shared resource is the
/// provider credential held inside the LLM client.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
}
