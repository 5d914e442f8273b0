// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API session and CORS tests.
//!
//! These tests verify that:
//! 1. Protected routes reject requests while signed out
//! 2. Login, register and logout drive the single session
//! 3. CORS preflight requests return correct headers

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

use common::{body_json, json_request};

#[tokio::test]
async fn test_protected_route_without_session() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(json_request("GET", "/api/footprint", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "unauthorized");
}

#[tokio::test]
async fn test_session_starts_anonymous() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(json_request("GET", "/auth/session", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["state"], "anonymous");
    assert!(body["user"].is_null());
}

#[tokio::test]
async fn test_login_then_access_then_logout() {
    let (app, state) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            Some(json!({"email": "a@b.com", "password": "123456"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let user = body_json(response).await;
    assert_eq!(user["name"], "a");
    assert!(user["createdAt"].is_string());

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/footprint", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/auth/logout", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(state.auth.current_user().await.is_none());

    let response = app
        .oneshot(json_request("GET", "/api/footprint", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_short_password() {
    let (app, state) = common::create_test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/login",
            Some(json!({"email": "a@b.com", "password": "12345"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_credentials");
    assert_eq!(body["details"], "Invalid credentials");
    assert!(state.auth.current_user().await.is_none());
}

#[tokio::test]
async fn test_malformed_login_body_is_json_error() {
    let (app, state) = common::create_test_app().await;

    let response = app
        .oneshot(json_request("POST", "/auth/login", Some(json!({"email": 5}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_request");
    assert!(body["details"].is_string());
    assert!(state.auth.current_user().await.is_none());
}

#[tokio::test]
async fn test_login_without_json_content_type() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .body(Body::from(r#"{"email":"a@b.com","password":"123456"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "bad_request");
}

#[tokio::test]
async fn test_register_messages() {
    let (app, _) = common::create_test_app().await;

    let cases = [
        (
            json!({"email": "a@b.com", "password": "123456", "name": "Ann", "confirm_password": "654321"}),
            "Passwords do not match",
        ),
        (
            json!({"email": "a@b.com", "password": "123", "name": "Ann", "confirm_password": "123"}),
            "Password must be at least 6 characters",
        ),
        (
            json!({"email": "a@b.com", "password": "123456"}),
            "Please fill all fields correctly",
        ),
    ];

    for (body, message) in cases {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/auth/register", Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_failed");
        assert_eq!(body["details"], message);
    }
}

#[tokio::test]
async fn test_register_success() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            Some(json!({
                "email": "ann@example.com",
                "password": "correct horse",
                "name": "Ann",
                "confirm_password": "correct horse"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Ann");

    let response = app
        .oneshot(json_request("GET", "/auth/session", None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["state"], "authenticated");
    assert_eq!(body["user"]["email"], "ann@example.com");
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/activities")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // OPTIONS should return 200 (CORS preflight success)
    assert_eq!(response.status(), StatusCode::OK);

    // Should have CORS headers
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_cors_preflight_rejects_look_alike_origin() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/activities")
                .header(header::ORIGIN, "http://localhost.attacker.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_public_route_no_auth_required() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(json_request("GET", "/health", None))
        .await
        .unwrap();

    // Health should be accessible signed out
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["coach_configured"], false);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
