//! Integration tests for health, request ids, and the session endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_failing_app, build_test_app, get, get_auth, post_json, register};
use serde_json::json;

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = build_test_app(["Heat"]);
    let response = get(app.router, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store_healthy"], true);
}

#[tokio::test]
async fn health_check_reports_degraded_store() {
    let response = get(build_failing_app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app(["Heat"]);
    let response = get(app.router, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app(["Heat"]);
    let response = get(app.router, "/listmovies").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("response must carry x-request-id");
    // UUID string, 36 chars with hyphens.
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn session_requires_bearer_token() {
    let app = build_test_app(["Heat"]);

    let response = get(app.router.clone(), "/session").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app.router.clone(), "/session", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_returns_token_owner() {
    let app = build_test_app(["Heat"]);
    register(&app.router, "Ada", "ada@example.com", "lovelace").await;

    let body = json!({ "email": "ada@example.com", "password": "lovelace" });
    let login = body_json(post_json(app.router.clone(), "/login", body).await).await;
    let token = login["access_token"].as_str().unwrap();

    let response = get_auth(app.router.clone(), "/session", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["email"], "ada@example.com");
    assert!(json["expires_at"].is_string());
}
