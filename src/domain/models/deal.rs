use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A promotional discount on a listing. Stored in the database so deals
/// survive restarts.
#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub listing_id: String,
    pub discount_percent: f64,
    pub valid_until: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Deal {
    pub fn new(listing_id: String, discount_percent: f64, valid_until: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            listing_id,
            discount_percent,
            valid_until,
            created_at: Utc::now(),
        }
    }
}
