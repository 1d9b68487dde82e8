mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn booking_payload(listing_id: &str) -> Value {
    json!({
        "listingId": listing_id,
        "checkIn": (Utc::now() + Duration::days(10)).to_rfc3339(),
        "checkOut": (Utc::now() + Duration::days(12)).to_rfc3339(),
        "totalPrice": 240.0,
        "guests": 2,
        "guestDetails": {
            "firstName": "Alice",
            "lastName": "Smith",
            "email": "alice@example.com",
            "phone": "+351911111111",
            "country": "Portugal"
        },
        "paymentDetails": { "method": "credit_card" }
    })
}

async fn post_booking(app: &TestApp, payload: Value, token: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/v1/bookings")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    app.router.clone().oneshot(builder.body(Body::from(payload.to_string())).unwrap()).await.unwrap()
}

#[tokio::test]
async fn test_booking_happy_path() {
    let app = TestApp::new().await;
    let listing_id = app.seed_listing("Seaside Hotel", Some(5)).await;
    let user_id = app.seed_user("alice@example.com", "secret123", true).await;
    let token = app.login("alice@example.com", "secret123").await;

    let res = post_booking(&app, booking_payload(&listing_id), Some(&token)).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Booking confirmed successfully!");
    assert!(body["bookingReference"].as_str().unwrap().starts_with("BK"));
    assert!(body["paymentId"].as_str().unwrap().starts_with("PAY_"));
    assert_eq!(body["booking"]["status"], "confirmed");
    assert_eq!(body["booking"]["paymentStatus"], "paid");
    assert_eq!(body["booking"]["accountId"], user_id);
    assert_eq!(body["booking"]["guests"]["adults"], 2);
    assert_eq!(body["booking"]["primaryGuest"]["firstName"], "Alice");
    assert_eq!(body["booking"]["listing"]["title"], "Seaside Hotel");
}

#[tokio::test]
async fn test_guest_booking_without_token() {
    let app = TestApp::new().await;
    let listing_id = app.seed_listing("Seaside Hotel", Some(5)).await;

    let res = post_booking(&app, booking_payload(&listing_id), None).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert!(body["booking"]["accountId"].is_null());
}

#[tokio::test]
async fn test_booking_missing_fields_are_named() {
    let app = TestApp::new().await;
    let listing_id = app.seed_listing("Seaside Hotel", Some(5)).await;

    let res = post_booking(&app, json!({
        "listingId": listing_id,
        "checkIn": (Utc::now() + Duration::days(10)).to_rfc3339(),
        "guestDetails": {
            "firstName": "Alice",
            "email": "alice@example.com"
        }
    }), None).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Missing required booking information:"));
    assert!(message.contains("checkOut"));
    assert!(message.contains("totalPrice"));
    assert!(message.contains("guestDetails.lastName"));
    assert!(message.contains("guestDetails.phone"));
    assert!(!message.contains("checkIn,"));
}

#[tokio::test]
async fn test_booking_unknown_listing_not_found() {
    let app = TestApp::new().await;

    let res = post_booking(&app, booking_payload("no-such-listing"), None).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = parse_body(res).await;
    assert_eq!(body["message"], "Listing not found");
}

#[tokio::test]
async fn test_booking_without_payment_method_rejected() {
    let app = TestApp::new().await;
    let listing_id = app.seed_listing("Seaside Hotel", Some(5)).await;

    let mut payload = booking_payload(&listing_id);
    payload["paymentDetails"] = json!({});

    let res = post_booking(&app, payload, None).await;

    assert_eq!(res.status(), StatusCode::PAYMENT_REQUIRED);
    let body = parse_body(res).await;
    assert_eq!(body["message"], "Payment method is required");

    // Nothing was reserved.
    let listing = app.state.listing_repo.find_by_id(&listing_id).await.unwrap().unwrap();
    assert_eq!(listing.available_stock, Some(5));
}

#[tokio::test]
async fn test_declined_payment_leaves_stock_untouched() {
    let app = TestApp::with_decline_rate(1.0).await;
    let listing_id = app.seed_listing("Seaside Hotel", Some(5)).await;

    let res = post_booking(&app, booking_payload(&listing_id), None).await;

    assert_eq!(res.status(), StatusCode::PAYMENT_REQUIRED);
    let body = parse_body(res).await;
    assert_eq!(body["message"], "Payment processing failed. Please try again.");

    let listing = app.state.listing_repo.find_by_id(&listing_id).await.unwrap().unwrap();
    assert_eq!(listing.available_stock, Some(5));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_guests_breakdown_and_defaults() {
    let app = TestApp::new().await;
    let listing_id = app.seed_listing("Seaside Hotel", None).await;

    let mut payload = booking_payload(&listing_id);
    payload["guests"] = json!({ "adults": 2, "children": 1, "infants": 1 });
    let res = post_booking(&app, payload, None).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["booking"]["guests"]["adults"], 2);
    assert_eq!(body["booking"]["guests"]["children"], 1);
    assert_eq!(body["booking"]["guests"]["infants"], 1);

    let mut payload = booking_payload(&listing_id);
    payload.as_object_mut().unwrap().remove("guests");
    let res = post_booking(&app, payload, None).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["booking"]["guests"]["adults"], 1);
    assert_eq!(body["booking"]["guests"]["children"], 0);
}

#[tokio::test]
async fn test_list_user_bookings_scoped_to_owner() {
    let app = TestApp::new().await;
    let listing_id = app.seed_listing("Seaside Hotel", Some(5)).await;
    let alice_id = app.seed_user("alice@example.com", "secret123", true).await;
    let bob_id = app.seed_user("bob@example.com", "secret123", true).await;
    let alice_token = app.login("alice@example.com", "secret123").await;
    let bob_token = app.login("bob@example.com", "secret123").await;

    let res = post_booking(&app, booking_payload(&listing_id), Some(&alice_token)).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Owner sees their booking with the listing attached.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/users/{}/bookings", alice_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", alice_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let bookings = body.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["listing"]["title"], "Seaside Hotel");
    assert_eq!(bookings[0]["totalPrice"], 240.0);
    assert_eq!(bookings[0]["guests"]["adults"], 2);
    assert_eq!(bookings[0]["primaryGuest"]["email"], "alice@example.com");
    assert!(bookings[0]["checkIn"].is_string());

    // Another user cannot read them.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/users/{}/bookings", alice_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", bob_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Bob has none of his own.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/users/{}/bookings", bob_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", bob_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_admin_can_list_any_users_bookings() {
    let app = TestApp::new().await;
    let listing_id = app.seed_listing("Seaside Hotel", Some(5)).await;
    let alice_id = app.seed_user("alice@example.com", "secret123", true).await;
    app.seed_admin("admin@example.com", "adminpass").await;
    let alice_token = app.login("alice@example.com", "secret123").await;
    let admin_token = app.login("admin@example.com", "adminpass").await;

    post_booking(&app, booking_payload(&listing_id), Some(&alice_token)).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/users/{}/bookings", alice_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_bookings_listed_newest_first() {
    let app = TestApp::new().await;
    let listing_id = app.seed_listing("Seaside Hotel", None).await;
    let alice_id = app.seed_user("alice@example.com", "secret123", true).await;
    let token = app.login("alice@example.com", "secret123").await;

    let first = post_booking(&app, booking_payload(&listing_id), Some(&token)).await;
    let first_ref = parse_body(first).await["bookingReference"].as_str().unwrap().to_string();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let second = post_booking(&app, booking_payload(&listing_id), Some(&token)).await;
    let second_ref = parse_body(second).await["bookingReference"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/users/{}/bookings", alice_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    let refs: Vec<&str> = body.as_array().unwrap().iter()
        .map(|b| b["bookingReference"].as_str().unwrap())
        .collect();
    assert_eq!(refs, vec![second_ref.as_str(), first_ref.as_str()]);
}
