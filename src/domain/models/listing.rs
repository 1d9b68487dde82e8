use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

/// A bookable inventory unit (hotel or package). `available_stock` is NULL
/// when the listing does not track inventory; when present it is decremented
/// by each confirmed booking and must never go negative.
#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub listing_type: String,
    pub city: String,
    pub country: String,
    pub price: f64,
    pub currency: String,
    pub available_stock: Option<i64>,
    pub max_guests: i64,
    pub images: Json<Vec<String>>,
    pub amenities: Json<Vec<String>>,
    pub host_id: Option<String>,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

pub struct NewListingParams {
    pub title: String,
    pub description: String,
    pub listing_type: String,
    pub city: String,
    pub country: String,
    pub price: f64,
    pub currency: String,
    pub available_stock: Option<i64>,
    pub max_guests: i64,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub host_id: Option<String>,
}

impl Listing {
    pub fn new(params: NewListingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            listing_type: params.listing_type,
            city: params.city,
            country: params.country,
            price: params.price,
            currency: params.currency,
            available_stock: params.available_stock,
            max_guests: params.max_guests,
            images: Json(params.images),
            amenities: Json(params.amenities),
            host_id: params.host_id,
            rating: 0.0,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ListingFilter {
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub listing_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}
