use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Json;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use serde_json::{Value, json};

use super::*;
use crate::testsupport::{RecordingNotifier, spawn_stub, unreachable_base_url};

async fn client_for(router: axum::Router) -> (HttpClient, Arc<RecordingNotifier>) {
    let base = spawn_stub(router).await;
    let notifier = Arc::new(RecordingNotifier::default());
    let client = HttpClient::new(&base, notifier.clone()).unwrap();
    (client, notifier)
}

// =============================================================================
// Success path and credential threading
// =============================================================================

#[tokio::test]
async fn get_decodes_success_body() {
    let router = axum::Router::new().route("/ping", get(|| async { Json(json!({"message": "pong"})) }));
    let (client, notifier) = client_for(router).await;

    let body: Value = client.get("/ping", None).await.unwrap();
    assert_eq!(body["message"], "pong");
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn bearer_header_attached_when_credential_given() {
    let router = axum::Router::new().route(
        "/echo",
        get(|headers: HeaderMap| async move {
            let auth = headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .map(ToOwned::to_owned);
            Json(json!({ "auth": auth }))
        }),
    );
    let (client, _) = client_for(router).await;

    let body: Value = client.get("/echo", Some("t1")).await.unwrap();
    assert_eq!(body["auth"], "Bearer t1");

    let body: Value = client.get("/echo", None).await.unwrap();
    assert!(body["auth"].is_null());
}

#[tokio::test]
async fn trailing_base_url_slash_is_normalized() {
    let router = axum::Router::new().route("/ping", get(|| async { Json(json!({"message": "pong"})) }));
    let base = spawn_stub(router).await;
    let notifier = Arc::new(RecordingNotifier::default());
    let client = HttpClient::new(&format!("{base}/"), notifier).unwrap();

    let body: Value = client.get("/ping", None).await.unwrap();
    assert_eq!(body["message"], "pong");
}

// =============================================================================
// Classification table
// =============================================================================

#[tokio::test]
async fn unauthorized_emits_expiry_event_without_notification() {
    let router = axum::Router::new().route(
        "/private",
        get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "token expired"}))) }),
    );
    let (client, notifier) = client_for(router).await;

    let expiries = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&expiries);
    client.on_session_expired(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let result = client.get::<Value>("/private", Some("stale")).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
    assert_eq!(expiries.load(Ordering::SeqCst), 1);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn forbidden_notifies_server_message() {
    let router = axum::Router::new().route(
        "/private",
        get(|| async { (StatusCode::FORBIDDEN, Json(json!({"message": "verification required"}))) }),
    );
    let (client, notifier) = client_for(router).await;

    let result = client.get::<Value>("/private", Some("t1")).await;
    assert!(matches!(result, Err(ApiError::Rejected { status: 403, .. })));
    assert_eq!(notifier.messages(), vec!["verification required"]);
}

#[tokio::test]
async fn not_found_without_message_stays_silent() {
    let router = axum::Router::new().route("/missing", get(|| async { (StatusCode::NOT_FOUND, Json(json!({}))) }));
    let (client, notifier) = client_for(router).await;

    let result = client.get::<Value>("/missing", None).await;
    assert!(matches!(result, Err(ApiError::Rejected { status: 404, message: None })));
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn validation_details_notified_individually() {
    let router = axum::Router::new().route(
        "/form",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "message": "invalid input",
                    "details": ["email is required", "password too short"]
                })),
            )
        }),
    );
    let (client, notifier) = client_for(router).await;

    let result = client.post::<Value, _>("/form", &json!({}), None).await;
    match result {
        Err(ApiError::Validation { details, .. }) => {
            assert_eq!(details, vec!["email is required", "password too short"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    // One notification per detail, in order, and nothing combined.
    assert_eq!(notifier.messages(), vec!["email is required", "password too short"]);
}

#[tokio::test]
async fn validation_without_details_notifies_single_message() {
    let router = axum::Router::new().route(
        "/form",
        post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"message": "invalid input"}))) }),
    );
    let (client, notifier) = client_for(router).await;

    let result = client.post::<Value, _>("/form", &json!({}), None).await;
    assert!(matches!(result, Err(ApiError::Validation { .. })));
    assert_eq!(notifier.messages(), vec!["invalid input"]);
}

#[tokio::test]
async fn rate_limit_uses_fixed_text() {
    let router =
        axum::Router::new().route("/busy", get(|| async { (StatusCode::TOO_MANY_REQUESTS, Json(json!({}))) }));
    let (client, notifier) = client_for(router).await;

    let result = client.get::<Value>("/busy", None).await;
    assert!(matches!(result, Err(ApiError::RateLimited)));
    assert_eq!(notifier.messages(), vec!["Too many requests. Please try again later."]);
}

#[tokio::test]
async fn server_errors_use_fixed_text() {
    let router = axum::Router::new().route(
        "/broken",
        get(|| async { (StatusCode::BAD_GATEWAY, Json(json!({"message": "upstream exploded"}))) }),
    );
    let (client, notifier) = client_for(router).await;

    let result = client.get::<Value>("/broken", None).await;
    assert!(matches!(result, Err(ApiError::Server { status: 502 })));
    // Server-provided text is not surfaced for 5xx.
    assert_eq!(notifier.messages(), vec!["Server error. Please try again later."]);
}

#[tokio::test]
async fn unknown_status_without_message_uses_generic_fallback() {
    let router = axum::Router::new().route("/odd", get(|| async { (StatusCode::IM_A_TEAPOT, Json(json!({}))) }));
    let (client, notifier) = client_for(router).await;

    let result = client.get::<Value>("/odd", None).await;
    assert!(matches!(result, Err(ApiError::Unexpected { status: 418, .. })));
    assert_eq!(notifier.messages(), vec!["An unexpected error occurred."]);
}

#[tokio::test]
async fn unknown_status_with_message_surfaces_it() {
    let router = axum::Router::new().route(
        "/odd",
        get(|| async { (StatusCode::BAD_REQUEST, Json(json!({"message": "bad request"}))) }),
    );
    let (client, notifier) = client_for(router).await;

    let result = client.get::<Value>("/odd", None).await;
    assert!(matches!(result, Err(ApiError::Unexpected { status: 400, .. })));
    assert_eq!(notifier.messages(), vec!["bad request"]);
}

// =============================================================================
// Transport and decode failures
// =============================================================================

#[tokio::test]
async fn connection_failure_notifies_connectivity() {
    let base = unreachable_base_url().await;
    let notifier = Arc::new(RecordingNotifier::default());
    let client = HttpClient::new(&base, notifier.clone()).unwrap();

    let result = client.get::<Value>("/anything", None).await;
    assert!(matches!(result, Err(ApiError::Network(_))));
    assert_eq!(notifier.messages(), vec!["Network error. Please check your connection."]);
}

#[tokio::test]
async fn mismatched_success_body_is_a_decode_error() {
    let router = axum::Router::new().route("/shape", get(|| async { Json(json!({"unexpected": true})) }));
    let (client, notifier) = client_for(router).await;

    let result = client.get::<crate::net::types::MessageResponse>("/shape", None).await;
    assert!(matches!(result, Err(ApiError::Decode(_))));
    assert_eq!(notifier.messages(), vec!["An unexpected error occurred."]);
}
