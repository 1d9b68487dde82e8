use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct GuestCounts {
    pub adults: i64,
    pub children: i64,
    pub infants: i64,
}

/// Contact snapshot taken at booking time, independent of any later
/// account edits.
#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryGuest {
    #[sqlx(rename = "guest_first_name")]
    pub first_name: String,
    #[sqlx(rename = "guest_last_name")]
    pub last_name: String,
    #[sqlx(rename = "guest_email")]
    pub email: String,
    #[sqlx(rename = "guest_phone")]
    pub phone: String,
    #[sqlx(rename = "guest_country")]
    pub country: String,
}

/// An immutable reservation record. `booking_reference` and `payment_id`
/// are assigned exactly once at creation and never regenerated; the only
/// status transition after creation is to `cancelled`.
#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub account_id: Option<String>,
    pub listing_id: String,
    pub booking_reference: String,
    pub payment_id: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    #[sqlx(flatten)]
    pub guests: GuestCounts,
    #[sqlx(flatten)]
    pub primary_guest: PrimaryGuest,
    pub special_requests: String,
    pub base_price: f64,
    pub total_price: f64,
    pub currency: String,
    pub payment_status: String,
    pub payment_method: String,
    pub status: String,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub account_id: Option<String>,
    pub listing_id: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: GuestCounts,
    pub primary_guest: PrimaryGuest,
    pub special_requests: String,
    pub total_price: f64,
    pub currency: String,
    pub payment_method: String,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: params.account_id,
            listing_id: params.listing_id,
            booking_reference: generate_booking_reference(),
            payment_id: generate_payment_id(),
            check_in: params.check_in,
            check_out: params.check_out,
            guests: params.guests,
            primary_guest: params.primary_guest,
            special_requests: params.special_requests,
            base_price: params.total_price,
            total_price: params.total_price,
            currency: params.currency,
            payment_status: "paid".to_string(),
            payment_method: params.payment_method,
            status: "confirmed".to_string(),
            cancelled_at: None,
            cancelled_by: None,
            cancellation_reason: None,
            created_at: Utc::now(),
        }
    }
}

/// Human-shareable reference: `BK` + millisecond timestamp + 9 random
/// uppercase alphanumerics. Collision-resistant under concurrent creation.
pub fn generate_booking_reference() -> String {
    format!("BK{}{}", Utc::now().timestamp_millis(), random_suffix())
}

pub fn generate_payment_id() -> String {
    format!("PAY_{}{}", Utc::now().timestamp_millis(), random_suffix())
}

fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

/// Payment form forwarded to the gateway. Only `method` is inspected by the
/// simulated gateway; card fields ride along for a real integration.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub method: Option<String>,
    pub card_number: Option<String>,
    pub card_holder: Option<String>,
    pub expiry: Option<String>,
    pub cvv: Option<String>,
}
