//! HTTP server & routing integration tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use coach_insights::llm::{ChatBackend, ChatRequest, LlmError};
use coach_insights::parse::{PLACEHOLDER_CONCEPT, PLACEHOLDER_INSIGHT};
use coach_insights::{build_router, AppState, InsightGenerator};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Per-model canned replies; a model without one fails
struct StubBackend {
    replies: Vec<(&'static str, &'static str)>,
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl ChatBackend for StubBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .unwrap()
            .push(request.messages[1].content.clone());
        self.replies
            .iter()
            .find(|(model, _)| *model == request.model)
            .map(|(_, reply)| reply.to_string())
            .ok_or_else(|| LlmError::Backend(format!("model {} is down", request.model)))
    }
}

fn app(replies: Vec<(&'static str, &'static str)>) -> (axum::Router, AppState, Arc<StubBackend>) {
    let backend = Arc::new(StubBackend {
        replies,
        prompts: Mutex::new(Vec::new()),
    });
    let state = AppState::new(InsightGenerator::new(
        backend.clone(),
        "gpt-4o",
        "gpt-3.5-turbo",
    ));
    (build_router(state.clone()), state, backend)
}

const GOOD_REPLY: &str =
    "```json\n{\"insight\": \"The e-pawn claims the center.\", \"tip\": \"Follow up with Nf3.\", \"concept\": \"Center control\"}\n```";

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chess/insights")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_insight_from_primary_model() {
    let (app, _, backend) = app(vec![("gpt-4o", GOOD_REPLY)]);

    let response = app
        .oneshot(post_json(
            &json!({
                "fen": "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
                "move": "e4",
                "notation": "e4",
                "difficulty": "beginner"
            })
            .to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["insight"], "The e-pawn claims the center.");
    assert_eq!(body["tip"], "Follow up with Nf3.");
    assert_eq!(body["concept"], "Center control");
    assert!(body.get("error").is_none());

    let prompts = backend.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Move just played: e4"));
}

#[tokio::test]
async fn test_fallback_model_answers_when_primary_fails() {
    let (app, _, backend) = app(vec![("gpt-3.5-turbo", GOOD_REPLY)]);

    let response = app
        .oneshot(post_json(r#"{"fen": "8/8/8/8/8/8/8/8 w - - 0 1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["concept"], "Center control");
    assert_eq!(backend.prompts.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unparsable_reply_gets_placeholders() {
    let (app, _, _) = app(vec![("gpt-4o", "Nice move! Keep developing.")]);

    let response = app
        .oneshot(post_json(r#"{"fen": "8/8/8/8/8/8/8/8 w - - 0 1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["insight"], PLACEHOLDER_INSIGHT);
    assert_eq!(body["concept"], PLACEHOLDER_CONCEPT);
}

#[tokio::test]
async fn test_missing_fen_is_bad_request() {
    let (app, _, backend) = app(vec![("gpt-4o", GOOD_REPLY)]);

    for body in [r#"{}"#, r#"{"move": "e4"}"#, r#"{"fen": ""}"#, r#"{"fen": "   "}"#] {
        let response = app.clone().oneshot(post_json(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(
            body_json(response).await,
            json!({"error": "FEN string is required"})
        );
    }
    assert!(backend.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (app, _, _) = app(vec![("gpt-4o", GOOD_REPLY)]);

    let response = app.oneshot(post_json("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_both_models_failing_is_server_error() {
    let (app, state, _) = app(vec![]);

    let response = app
        .clone()
        .oneshot(post_json(r#"{"fen": "8/8/8/8/8/8/8/8 w - - 0 1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["insight"], "Unable to generate insight at this time.");
    assert_eq!(
        body["tip"],
        "Please try again later or continue with the tutorial."
    );
    assert_eq!(body["concept"], "Error occurred.");
    assert!(body["error"].as_str().unwrap().contains("gpt-3.5-turbo"));

    // Failure is visible in health diagnostics
    assert!(state.last_error.read().await.is_some());
    let health = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(body_json(health).await["last_error"]
        .as_str()
        .unwrap()
        .contains("is down"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _, _) = app(vec![]);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "coach-insights");
    assert!(body["uptime_seconds"].is_u64());
    assert!(body.get("last_error").is_none());
}

#[tokio::test]
async fn test_cors_allows_cross_origin_callers() {
    let (app, _, _) = app(vec![("gpt-4o", GOOD_REPLY)]);

    let mut request = post_json(r#"{"fen": "8/8/8/8/8/8/8/8 w - - 0 1"}"#);
    request
        .headers_mut()
        .insert("origin", "http://localhost:3000".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _, _) = app(vec![]);

    let response = app
        .oneshot(Request::builder().uri("/api/chess/moves").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
