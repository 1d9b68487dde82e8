use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, auth, booking, deal, health, listing};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/forgot-password", post(auth::forgot_password))
        .route("/api/v1/auth/reset-password", post(auth::reset_password))
        .route("/api/v1/auth/profile", get(auth::profile))

        // Catalog (public)
        .route("/api/v1/listings", get(listing::list_listings))
        .route("/api/v1/listings/{listing_id}", get(listing::get_listing))
        .route("/api/v1/deals", get(deal::list_deals))

        // Bookings
        .route("/api/v1/bookings", post(booking::create_booking))
        .route("/api/v1/bookings/{booking_id}/cancel", post(booking::cancel_booking))
        .route("/api/v1/users/{user_id}/bookings", get(booking::list_user_bookings))

        // Admin - account admission
        .route("/api/v1/admin/users", get(admin::list_users))
        .route("/api/v1/admin/users/{user_id}/approve", put(admin::approve_user))
        .route("/api/v1/admin/users/{user_id}", delete(admin::reject_user))

        // Admin - catalog
        .route("/api/v1/admin/packages", post(admin::create_package))
        .route("/api/v1/admin/packages/{listing_id}", put(admin::update_package).delete(admin::delete_package))

        // Admin - deals
        .route("/api/v1/admin/deals", post(deal::create_deal))
        .route("/api/v1/admin/deals/{deal_id}", put(deal::update_deal).delete(deal::delete_deal))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
