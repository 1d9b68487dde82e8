use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreatePackageRequest, UpdatePackageRequest};
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::listing::{Listing, NewListingParams};
use crate::error::AppError;
use std::sync::Arc;
use sqlx::types::Json as SqlJson;
use tracing::info;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let accounts = state.account_repo.list().await?;
    Ok(Json(accounts))
}

/// Idempotent: approving an already-verified account succeeds unchanged.
pub async fn approve_user(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.account_repo.mark_verified(&user_id).await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    info!("Account approved: {}", account.id);

    Ok(Json(serde_json::json!({
        "message": "User approved successfully",
        "user": account
    })))
}

/// Reject is only defined for pending registrations; a verified account
/// cannot be removed this way.
pub async fn reject_user(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.account_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    if account.is_verified {
        return Err(AppError::NotFound("No pending registration found for this account".to_string()));
    }

    state.account_repo.delete(&account.id).await?;

    info!("Pending account rejected and deleted: {}", account.id);

    Ok(Json(serde_json::json!({ "message": "User deleted successfully" })))
}

pub async fn create_package(
    State(state): State<Arc<AppState>>,
    AdminUser(claims): AdminUser,
    Json(payload): Json<CreatePackageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut missing = Vec::new();
    if payload.title.is_none() { missing.push("title"); }
    if payload.price.is_none() { missing.push("price"); }
    if payload.city.is_none() { missing.push("city"); }
    if payload.country.is_none() { missing.push("country"); }
    if !missing.is_empty() {
        return Err(AppError::Validation(format!("Missing required fields: {}", missing.join(", "))));
    }

    let listing = Listing::new(NewListingParams {
        title: payload.title.unwrap(),
        description: payload.description.unwrap_or_default(),
        listing_type: payload.listing_type.unwrap_or_else(|| "hotel".to_string()),
        city: payload.city.unwrap(),
        country: payload.country.unwrap(),
        price: payload.price.unwrap(),
        currency: payload.currency.unwrap_or_else(|| "USD".to_string()),
        available_stock: payload.available_stock,
        max_guests: payload.max_guests.unwrap_or(2),
        images: payload.images.unwrap_or_default(),
        amenities: payload.amenities.unwrap_or_default(),
        host_id: Some(claims.sub),
    });

    let created = state.listing_repo.create(&listing).await?;

    info!("Package created: {}", created.id);

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "message": "Package added successfully",
        "listing": created
    }))))
}

pub async fn update_package(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(listing_id): Path<String>,
    Json(payload): Json<UpdatePackageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut listing = state.listing_repo.find_by_id(&listing_id).await?
        .ok_or(AppError::NotFound("Package not found".to_string()))?;

    if let Some(title) = payload.title { listing.title = title; }
    if let Some(description) = payload.description { listing.description = description; }
    if let Some(listing_type) = payload.listing_type { listing.listing_type = listing_type; }
    if let Some(city) = payload.city { listing.city = city; }
    if let Some(country) = payload.country { listing.country = country; }
    if let Some(price) = payload.price { listing.price = price; }
    if let Some(currency) = payload.currency { listing.currency = currency; }
    if let Some(stock) = payload.available_stock { listing.available_stock = Some(stock); }
    if let Some(max_guests) = payload.max_guests { listing.max_guests = max_guests; }
    if let Some(images) = payload.images { listing.images = SqlJson(images); }
    if let Some(amenities) = payload.amenities { listing.amenities = SqlJson(amenities); }

    let updated = state.listing_repo.update(&listing).await?;

    info!("Package updated: {}", updated.id);

    Ok(Json(serde_json::json!({
        "message": "Package updated successfully",
        "listing": updated
    })))
}

pub async fn delete_package(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(listing_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.listing_repo.delete(&listing_id).await?;

    info!("Package deleted: {}", listing_id);

    Ok(Json(serde_json::json!({ "message": "Package deleted successfully" })))
}
