use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A registered identity. Created unverified by self-registration; only an
/// admin action flips `is_verified`, and no token is issued before that.
#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub is_verified: bool,
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub reset_otp_hash: Option<String>,
    #[serde(skip_serializing)]
    pub reset_otp_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Account {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            role: "user".to_string(),
            is_verified: false,
            is_active: true,
            reset_otp_hash: None,
            reset_otp_expires_at: None,
            created_at: Utc::now(),
            last_login: None,
        }
    }
}
