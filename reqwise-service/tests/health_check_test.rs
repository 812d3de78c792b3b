mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use common::{body_json, spawn_app};

#[tokio::test]
#[ignore] // Requires database - set TEST_DATABASE_URL
async fn health_check_reports_healthy() {
    let app = spawn_app().await;

    let response = app
        .request(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["postgres"], "up");
}
