//! Tests for the public orchestrator serve route and the health endpoint.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use common::{body_json, build_test_app, get, send, RecordingSender, RecordingStore};

fn app() -> axum::Router {
    build_test_app(
        Arc::new(RecordingStore::default()),
        Arc::new(RecordingSender::default()),
    )
}

#[tokio::test]
async fn get_describes_registered_functions_without_a_session() {
    let response = get(app(), "/api/inngest").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["app_id"], "nodeflow-test");
    assert_eq!(json["function_count"], 1);
    assert_eq!(json["has_event_key"], true);
    assert_eq!(json["functions"][0]["id"], "execute");
    assert_eq!(json["functions"][0]["triggers"][0]["event"], "test/hello.wordl");
}

#[tokio::test]
async fn post_invocation_is_not_served() {
    let response = send(app(), Method::POST, "/api/inngest?fnId=execute", None).await;

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FUNCTION_NOT_SERVED");
    assert!(json["error"].as_str().unwrap().contains("execute"));
}

#[tokio::test]
async fn put_registration_failure_is_a_delivery_error() {
    // The test config points the orchestrator at a closed port.
    let response = send(app(), Method::PUT, "/api/inngest", None).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "DELIVERY_ERROR");
}

#[tokio::test]
async fn health_reports_store_reachability() {
    let response = get(app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());

    let degraded = build_test_app(
        Arc::new(RecordingStore::failing()),
        Arc::new(RecordingSender::default()),
    );
    let json = body_json(get(degraded, "/health").await).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let response = get(app(), "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(app(), "/api/trpc/deleteWorkflow").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_preflight_allows_put_from_configured_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/inngest")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "PUT")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
    assert!(headers
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("PUT"));
}
