use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateDealRequest, UpdateDealRequest};
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::deal::Deal;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_deals(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let deals = state.deal_repo.list().await?;
    Ok(Json(deals))
}

pub async fn create_deal(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateDealRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (package_id, discount, valid_until) = match (payload.package_id, payload.discount, payload.valid_until) {
        (Some(p), Some(d), Some(v)) => (p, d, v),
        _ => return Err(AppError::Validation("packageId, discount, and validUntil are required".to_string())),
    };

    state.listing_repo.find_by_id(&package_id).await?
        .ok_or(AppError::NotFound("Package not found".to_string()))?;

    let deal = Deal::new(package_id, discount, valid_until);
    let created = state.deal_repo.create(&deal).await?;

    info!("Deal created: {} ({}% off)", created.id, created.discount_percent);

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "message": "Deal added successfully",
        "deal": created
    }))))
}

pub async fn update_deal(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(deal_id): Path<String>,
    Json(payload): Json<UpdateDealRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut deal = state.deal_repo.find_by_id(&deal_id).await?
        .ok_or(AppError::NotFound("Deal not found".to_string()))?;

    if let Some(discount) = payload.discount { deal.discount_percent = discount; }
    if let Some(valid_until) = payload.valid_until { deal.valid_until = valid_until; }

    let updated = state.deal_repo.update(&deal).await?;

    info!("Deal updated: {}", updated.id);

    Ok(Json(serde_json::json!({
        "message": "Deal updated successfully",
        "deal": updated
    })))
}

pub async fn delete_deal(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(deal_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.deal_repo.delete(&deal_id).await?;

    info!("Deal deleted: {}", deal_id);

    Ok(Json(serde_json::json!({ "message": "Deal deleted successfully" })))
}
