pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers::handle_chat;
use crate::plan::handlers::handle_plan;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/plan", post(handle_plan))
        .route("/api/v1/chat", post(handle_chat))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::llm_client::LlmClient;

    fn app(llm: LlmClient) -> Router {
        build_router(AppState { llm })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_value(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Serves a canned response for any `generateContent` path, standing in
    /// for the provider.
    async fn spawn_fake_provider(status: StatusCode, body: Value) -> String {
        let handler = move || {
            let body = body.clone();
            async move { (status, axum::Json(body)) }
        };
        let fake = Router::new().route("/models/*rest", post(handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, fake).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn provider_envelope(text: &str) -> Value {
        json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": text}]}}
            ]
        })
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app(LlmClient::new(None));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_value(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn plan_rejects_missing_user_query() {
        let app = app(LlmClient::new(Some("key".into())));
        let response = app
            .oneshot(post_json("/api/v1/plan", json!({ "userQuery": "  " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_value(response).await;
        assert_eq!(body["error"], "Missing userQuery");
    }

    #[tokio::test]
    async fn plan_without_credential_is_a_labeled_500_before_any_provider_call() {
        let app = app(LlmClient::new(None));
        let response = app
            .oneshot(post_json("/api/v1/plan", json!({ "userQuery": "situation" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_value(response).await;
        assert!(body["error"].as_str().unwrap().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn plan_relays_the_provider_text_verbatim() {
        let plan_text = r#"{"disclaimer":"Please remember...","analysisSummary":"s","requiredForms":[],"nextSteps":[]}"#;
        let base_url = spawn_fake_provider(StatusCode::OK, provider_envelope(plan_text)).await;
        let llm = LlmClient::new(Some("key".into())).with_base_url(base_url);

        let response = app(llm)
            .oneshot(post_json("/api/v1/plan", json!({ "userQuery": "situation" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(std::str::from_utf8(&bytes).unwrap(), plan_text);
    }

    #[tokio::test]
    async fn plan_surfaces_provider_failure_with_details() {
        let base_url = spawn_fake_provider(
            StatusCode::SERVICE_UNAVAILABLE,
            json!({"error": {"message": "model overloaded"}}),
        )
        .await;
        let llm = LlmClient::new(Some("key".into())).with_base_url(base_url);

        let response = app(llm)
            .oneshot(post_json("/api/v1/plan", json!({ "userQuery": "situation" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_value(response).await;
        assert!(body["error"].as_str().unwrap().contains("503"));
        assert_eq!(body["details"], "model overloaded");
    }

    #[tokio::test]
    async fn plan_flags_an_envelope_without_text_as_invalid() {
        let base_url = spawn_fake_provider(StatusCode::OK, json!({ "candidates": [] })).await;
        let llm = LlmClient::new(Some("key".into())).with_base_url(base_url);

        let response = app(llm)
            .oneshot(post_json("/api/v1/plan", json!({ "userQuery": "situation" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_value(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Invalid response structure"));
    }

    #[tokio::test]
    async fn chat_wraps_the_reply_in_an_envelope() {
        let base_url =
            spawn_fake_provider(StatusCode::OK, provider_envelope("Line 10 is for adjustments."))
                .await;
        let llm = LlmClient::new(Some("key".into())).with_base_url(base_url);

        let response = app(llm)
            .oneshot(post_json(
                "/api/v1/chat",
                json!({
                    "userQuery": "What is line 10?",
                    "history": [
                        {"role": "user", "parts": [{"text": "I am asking about Form 1040 (U.S. Individual Income Tax Return)."}]},
                        {"role": "model", "parts": [{"text": "Got it. I'm ready to help you with that form. What's your question?"}]}
                    ],
                    "pdfBase64": "QkFTRTY0",
                    "language": "es"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_value(response).await;
        assert_eq!(body["reply"], "Line 10 is for adjustments.");
    }

    #[tokio::test]
    async fn chat_rejects_missing_user_query() {
        let app = app(LlmClient::new(Some("key".into())));
        let response = app
            .oneshot(post_json(
                "/api/v1/chat",
                json!({ "userQuery": "", "history": [] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_value(response).await;
        assert_eq!(body["error"], "Missing userQuery");
    }

    #[tokio::test]
    async fn chat_rejects_a_request_without_history() {
        let app = app(LlmClient::new(Some("key".into())));
        let response = app
            .oneshot(post_json("/api/v1/chat", json!({ "userQuery": "hi" })))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}
