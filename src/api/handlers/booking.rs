use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CancelBookingRequest, CreateBookingRequest, GuestsInput};
use crate::api::dtos::responses::{BookingConfirmation, BookingWithListing};
use crate::api::extractors::{auth::AuthUser, maybe_auth::MaybeAuthUser};
use crate::domain::models::booking::{Booking, GuestCounts, NewBookingParams, PaymentDetails, PrimaryGuest};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(claims): MaybeAuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut missing = Vec::new();
    if payload.listing_id.is_none() { missing.push("listingId"); }
    if payload.check_in.is_none() { missing.push("checkIn"); }
    if payload.check_out.is_none() { missing.push("checkOut"); }
    if payload.total_price.is_none() { missing.push("totalPrice"); }
    match &payload.guest_details {
        None => missing.push("guestDetails"),
        Some(details) => {
            if details.first_name.is_none() { missing.push("guestDetails.firstName"); }
            if details.last_name.is_none() { missing.push("guestDetails.lastName"); }
            if details.email.is_none() { missing.push("guestDetails.email"); }
            if details.phone.is_none() { missing.push("guestDetails.phone"); }
        }
    }
    if !missing.is_empty() {
        return Err(AppError::Validation(
            format!("Missing required booking information: {}", missing.join(", "))
        ));
    }

    let listing_id = payload.listing_id.unwrap();
    let details = payload.guest_details.unwrap();

    let listing = state.listing_repo.find_by_id(&listing_id).await?
        .ok_or(AppError::NotFound("Listing not found".to_string()))?;

    // Pre-check only; the authoritative guard is the conditional decrement
    // inside the booking transaction.
    if let Some(stock) = listing.available_stock {
        if stock < 1 {
            return Err(AppError::InsufficientInventory("No availability for selected dates".to_string()));
        }
    }

    let payment = payload.payment_details.unwrap_or(PaymentDetails {
        method: None,
        card_number: None,
        card_holder: None,
        expiry: None,
        cvv: None,
    });

    state.payment_gateway.authorize(&payment).await?;

    let guests = match payload.guests {
        Some(GuestsInput::Count(n)) => GuestCounts { adults: n.max(1), children: 0, infants: 0 },
        Some(GuestsInput::Breakdown { adults, children, infants }) => GuestCounts {
            adults: adults.unwrap_or(1),
            children: children.unwrap_or(0),
            infants: infants.unwrap_or(0),
        },
        None => GuestCounts { adults: 1, children: 0, infants: 0 },
    };

    let account_id = payload.user_id.or_else(|| claims.map(|c| c.sub));

    let booking = Booking::new(NewBookingParams {
        account_id,
        listing_id,
        check_in: payload.check_in.unwrap(),
        check_out: payload.check_out.unwrap(),
        guests,
        primary_guest: PrimaryGuest {
            first_name: details.first_name.unwrap(),
            last_name: details.last_name.unwrap(),
            email: details.email.unwrap(),
            phone: details.phone.unwrap(),
            country: details.country.unwrap_or_default(),
        },
        special_requests: details.special_requests.unwrap_or_default(),
        total_price: payload.total_price.unwrap(),
        currency: listing.currency.clone(),
        payment_method: payment.method.unwrap_or_else(|| "credit_card".to_string()),
    });

    let created = state.booking_repo.create(&booking, listing.available_stock.is_some()).await?;

    info!(
        "Booking confirmed: {} (reference {}) for listing {}",
        created.id, created.booking_reference, created.listing_id
    );

    let booking_reference = created.booking_reference.clone();
    let payment_id = created.payment_id.clone();

    Ok((StatusCode::CREATED, Json(BookingConfirmation {
        success: true,
        message: "Booking confirmed successfully!".to_string(),
        booking: BookingWithListing { booking: created, listing: Some(listing) },
        booking_reference,
        payment_id,
    })))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(claims): MaybeAuthUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<CancelBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".to_string()))?;

    if booking.status == "cancelled" {
        return Err(AppError::Conflict("Booking is already cancelled".to_string()));
    }

    let hours_until_check_in = (booking.check_in - Utc::now()).num_hours();
    if hours_until_check_in < 24 {
        warn!(
            "Cancellation rejected for booking {}: {} hours before check-in",
            booking.id, hours_until_check_in
        );
        return Err(AppError::PolicyViolation(format!(
            "Cancellation window closed: check-in is {} hours away and cancellation is only allowed 24 hours before check-in.",
            hours_until_check_in
        )));
    }

    let mut to_cancel = booking.clone();
    to_cancel.cancelled_by = Some(claims.map(|c| c.role).unwrap_or_else(|| "user".to_string()));
    to_cancel.cancellation_reason = Some(
        payload.reason.unwrap_or_else(|| "User requested cancellation".to_string())
    );

    let cancelled = state.booking_repo.cancel(&to_cancel).await?;

    info!("Booking cancelled: {}", cancelled.id);

    Ok(Json(serde_json::json!({
        "message": "Booking cancelled successfully",
        "booking": cancelled
    })))
}

pub async fn list_user_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if claims.sub != user_id && claims.role != "admin" {
        return Err(AppError::Forbidden("You can only view your own bookings".to_string()));
    }

    let bookings = state.booking_repo.list_by_account(&user_id).await?;

    let mut result = Vec::with_capacity(bookings.len());
    for booking in bookings {
        let listing = state.listing_repo.find_by_id(&booking.listing_id).await?;
        result.push(BookingWithListing { booking, listing });
    }

    Ok(Json(result))
}
