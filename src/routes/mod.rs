//! Router assembly: HTTP endpoints, WebSocket upgrade, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - CORS (allow any origin/method/headers); tighten for production
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/session", post(http::http_post_session))
        .route("/api/v1/profile", get(http::http_get_profile))
        .route("/api/v1/tasks", get(http::http_get_tasks))
        .route("/api/v1/outcome", post(http::http_post_outcome))
        .route("/api/v1/sentence/validate", post(http::http_post_sentence))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::RecordingSink;
    use crate::config::EngineConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::with_parts(EngineConfig::default(), Arc::new(RecordingSink::default()));
        build_router(Arc::new(state))
    }

    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health() {
        let (status, body) = call(&app(), get("/api/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn full_feed_round_trip() {
        let app = app();
        let persisted = json!({ "userId": "stored", "levels": { "MATH_ADDITION": 3 } });
        let (status, session) = call(&app, post("/api/v1/session", json!({ "persisted": persisted }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["userId"], "stored");
        assert_eq!(session["profile"]["levels"]["MATH_ADDITION"], 3.0);
        assert_eq!(session["profile"]["levels"]["REACTION_COLOR"], 1.0);

        let (status, tasks) = call(&app, get("/api/v1/tasks?userId=stored&count=10")).await;
        assert_eq!(status, StatusCode::OK);
        let tasks = tasks["tasks"].as_array().unwrap().clone();
        assert_eq!(tasks.len(), 3);
        let task = &tasks[0];

        let (status, out) = call(
            &app,
            post(
                "/api/v1/outcome",
                json!({
                    "userId": "stored",
                    "sessionId": session["sessionId"],
                    "taskId": task["id"],
                    "success": true,
                    "timeSpentMs": 2500
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(out["outcome"]["taskId"], task["id"]);
        assert_eq!(out["outcome"]["type"], task["type"]);
        assert_eq!(out["previousLevel"], task["difficultyLevel"]);
        assert!(out["decision"].is_string());

        let (status, profile) = call(&app, get("/api/v1/profile?userId=stored")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile, out["profile"]);
        assert_eq!(profile["totalTimeMs"], 2500);
    }

    #[tokio::test]
    async fn session_accepts_the_stored_string_form() {
        let app = app();
        let stored = json!({ "userId": "from-storage", "levels": { "REACTION_COLOR": 4.5 } }).to_string();
        let (status, session) = call(&app, post("/api/v1/session", json!({ "persisted": stored }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["userId"], "from-storage");
        assert_eq!(session["profile"]["levels"]["REACTION_COLOR"], 4.5);
    }

    #[tokio::test]
    async fn errors_map_to_status_codes() {
        let app = app();
        let (status, body) = call(&app, get("/api/v1/tasks?userId=ghost")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("ghost"));

        let (_, session) = call(&app, post("/api/v1/session", json!({ "userId": "u" }))).await;
        let (status, _) = call(
            &app,
            post(
                "/api/v1/outcome",
                json!({
                    "userId": "u",
                    "sessionId": session["sessionId"],
                    "taskId": "never-issued",
                    "success": true,
                    "timeSpentMs": 100
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(
            &app,
            post(
                "/api/v1/outcome",
                json!({ "userId": "u", "sessionId": "sess_bogus", "taskId": "x", "success": true, "timeSpentMs": 1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn sentence_validation_endpoint() {
        let app = app();
        let (_, ok) = call(
            &app,
            post("/api/v1/sentence/validate", json!({ "word1": "Sun", "word2": "Ice", "sentence": "The sun melted the ice." })),
        )
        .await;
        assert_eq!(ok, json!({ "valid": true }));
        let (_, bad) = call(
            &app,
            post("/api/v1/sentence/validate", json!({ "word1": "Sun", "word2": "Ice", "sentence": "sun" })),
        )
        .await;
        assert_eq!(bad, json!({ "valid": false }));
    }
}
