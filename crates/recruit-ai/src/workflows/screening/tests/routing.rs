use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;

use crate::workflows::screening::repository::CandidateRepository;
use crate::workflows::screening::router::screening_router;

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn router_over<R: CandidateRepository + 'static>(repository: Arc<R>) -> axum::Router {
    screening_router(Arc::new(orchestrator(repository)))
}

fn chat_request(turns: Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post("/api/v1/screening/chat")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&json!({ "turns": turns })).unwrap(),
        ))
        .unwrap()
}

#[tokio::test]
async fn chat_route_opens_the_interview() {
    let router = router_over(Arc::new(MemoryRepository::default()));

    let response = router
        .oneshot(chat_request(json!([])))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let message = payload.get("message").and_then(Value::as_str).unwrap_or_default();
    assert!(message.contains("Tsavo West"));
    assert!(payload.get("tool").map(Value::is_null).unwrap_or(true));
}

#[tokio::test]
async fn chat_route_reports_the_lookup_call() {
    let router = router_over(Arc::new(MemoryRepository::default()));

    let turns = json!([
        { "role": "candidate", "text": "Alex Reyes" },
        { "role": "agent", "text": "Great to meet you, Alex!" },
        { "role": "candidate", "text": "alex.reyes@example.com" },
    ]);
    let response = router
        .oneshot(chat_request(turns))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.pointer("/tool/tool").and_then(Value::as_str),
        Some("lookup_by_email")
    );
}

#[tokio::test]
async fn candidate_route_returns_stored_records() {
    let repository = Arc::new(MemoryRepository::default());
    let record = evaluated_record("cand-000042", "alex.reyes@example.com");
    repository
        .records
        .lock()
        .unwrap()
        .insert(record.identity.email.clone(), record);

    let router = router_over(repository);
    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/screening/candidates/alex.reyes@example.com")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.pointer("/id").and_then(Value::as_str),
        Some("cand-000042")
    );
    assert_eq!(
        payload.pointer("/evaluation/match_score").and_then(Value::as_u64),
        Some(100)
    );
}

#[tokio::test]
async fn candidate_route_reports_missing_records() {
    let router = router_over(Arc::new(MemoryRepository::default()));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/screening/candidates/ghost@example.com")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn candidate_route_rejects_malformed_addresses() {
    let router = router_over(Arc::new(MemoryRepository::default()));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/screening/candidates/not-an-email")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn candidate_route_surfaces_store_outages() {
    let router = router_over(Arc::new(UnavailableRepository));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/screening/candidates/alex.reyes@example.com")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
