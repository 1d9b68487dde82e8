use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::domain::models::listing::ListingFilter;
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_listings(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ListingFilter>,
) -> Result<impl IntoResponse, AppError> {
    let listings = state.listing_repo.search(&filter).await?;
    Ok(Json(listings))
}

pub async fn get_listing(
    State(state): State<Arc<AppState>>,
    Path(listing_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let listing = state.listing_repo.find_by_id(&listing_id).await?
        .ok_or(AppError::NotFound("Listing not found".to_string()))?;
    Ok(Json(listing))
}
