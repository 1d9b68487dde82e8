mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;
use travel_booking_backend::domain::services::auth_service::AuthService;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_json(app: &TestApp, uri: &str, payload: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap()
}

fn extract_otp(html: &str) -> String {
    let digits: Vec<char> = html.chars().collect();
    for window in digits.windows(6) {
        if window.iter().all(|c| c.is_ascii_digit()) {
            return window.iter().collect();
        }
    }
    panic!("No OTP found in email body: {}", html);
}

#[tokio::test]
async fn test_forgot_password_sends_otp_email() {
    let app = TestApp::new().await;
    app.seed_user("alice@example.com", "secret123", true).await;

    let res = post_json(&app, "/api/v1/auth/forgot-password", json!({
        "email": "alice@example.com"
    })).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["message"], "OTP sent successfully to your email");

    let outbox = app.outbox.lock().unwrap();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].recipient, "alice@example.com");
    let otp = extract_otp(&outbox[0].html_body);
    assert_eq!(otp.len(), 6);
}

#[tokio::test]
async fn test_forgot_password_unknown_email_not_found() {
    let app = TestApp::new().await;

    let res = post_json(&app, "/api/v1/auth/forgot-password", json!({
        "email": "ghost@example.com"
    })).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(app.outbox.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_full_reset_flow() {
    let app = TestApp::new().await;
    app.seed_user("alice@example.com", "oldpassword", true).await;

    post_json(&app, "/api/v1/auth/forgot-password", json!({
        "email": "alice@example.com"
    })).await;

    let otp = {
        let outbox = app.outbox.lock().unwrap();
        extract_otp(&outbox[0].html_body)
    };

    let res = post_json(&app, "/api/v1/auth/reset-password", json!({
        "email": "alice@example.com",
        "otp": otp,
        "newPassword": "brand-new-pass"
    })).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert!(body["message"].as_str().unwrap().contains("Password reset successful"));

    // Old password no longer works, new one does.
    let res = post_json(&app, "/api/v1/auth/login", json!({
        "email": "alice@example.com", "password": "oldpassword"
    })).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = post_json(&app, "/api/v1/auth/login", json!({
        "email": "alice@example.com", "password": "brand-new-pass"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_reset_with_wrong_otp_rejected() {
    let app = TestApp::new().await;
    app.seed_user("alice@example.com", "secret123", true).await;

    post_json(&app, "/api/v1/auth/forgot-password", json!({
        "email": "alice@example.com"
    })).await;

    let res = post_json(&app, "/api/v1/auth/reset-password", json!({
        "email": "alice@example.com",
        "otp": "000000",
        "newPassword": "whatever"
    })).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["message"], "Invalid OTP");
}

#[tokio::test]
async fn test_reset_without_requesting_otp_rejected() {
    let app = TestApp::new().await;
    app.seed_user("alice@example.com", "secret123", true).await;

    let res = post_json(&app, "/api/v1/auth/reset-password", json!({
        "email": "alice@example.com",
        "otp": "123456",
        "newPassword": "whatever"
    })).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["message"], "No OTP found. Please request a new one.");
}

#[tokio::test]
async fn test_expired_otp_rejected() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("alice@example.com", "secret123", true).await;

    // Plant an OTP that expired an hour ago.
    app.state.account_repo
        .set_reset_otp(&user_id, &AuthService::hash_otp("654321"), Utc::now() - Duration::hours(1))
        .await
        .unwrap();

    let res = post_json(&app, "/api/v1/auth/reset-password", json!({
        "email": "alice@example.com",
        "otp": "654321",
        "newPassword": "whatever"
    })).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["message"], "OTP has expired. Please request a new one.");
}

#[tokio::test]
async fn test_otp_single_use() {
    let app = TestApp::new().await;
    app.seed_user("alice@example.com", "secret123", true).await;

    post_json(&app, "/api/v1/auth/forgot-password", json!({
        "email": "alice@example.com"
    })).await;

    let otp = {
        let outbox = app.outbox.lock().unwrap();
        extract_otp(&outbox[0].html_body)
    };

    let first = post_json(&app, "/api/v1/auth/reset-password", json!({
        "email": "alice@example.com", "otp": otp, "newPassword": "pass-one"
    })).await;
    assert_eq!(first.status(), StatusCode::OK);

    // The OTP is cleared with the password update.
    let second = post_json(&app, "/api/v1/auth/reset-password", json!({
        "email": "alice@example.com", "otp": otp, "newPassword": "pass-two"
    })).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}
