//! Health Check API Tests

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();
    let response = app.server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_liveness() {
    let app = TestApp::new();
    let body: Value = app.server.get("/health/live").await.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_pings_store() {
    let app = TestApp::new();
    let response = app.server.get("/health/ready").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["store"]["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_fails_when_store_is_down() {
    let app = TestApp::with_unreachable_store();
    let response = app.server.get("/health/ready").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = response.json();
    assert_eq!(body["status"], "unhealthy");
}
