//! Integration tests for registration and login.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{STRONG_PASSWORD, TestApp};

fn unique(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &suffix[..12])
}

#[tokio::test]
async fn test_register_then_login() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let token = app.register_and_login().await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let email = format!("{}@example.com", unique("dup"));
    let body = json!({
        "username": unique("dup"),
        "email": email,
        "password": STRONG_PASSWORD,
    });

    let first = app.request("POST", "/auth/register", Some(body), None).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "username": unique("dup"),
                "email": email,
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert!(second.body["message"].is_string());
}

#[tokio::test]
async fn test_weak_password_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "username": unique("weak"),
                "email": format!("{}@example.com", unique("weak")),
                "password": "password1!",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let username = unique("wrongpw");
    let email = format!("{username}@example.com");
    app.request(
        "POST",
        "/auth/register",
        Some(json!({
            "username": username,
            "email": email,
            "password": STRONG_PASSWORD,
        })),
        None,
    )
    .await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": email, "password": "not-the-password" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_files_require_authentication() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app.request("GET", "/files", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/files", None, Some("not-a-valid-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
