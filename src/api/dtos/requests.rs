use crate::domain::models::booking::PaymentDetails;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
    pub new_password: Option<String>,
}

/// The client sends either a bare adult count or a full breakdown.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum GuestsInput {
    Count(i64),
    Breakdown {
        adults: Option<i64>,
        children: Option<i64>,
        infants: Option<i64>,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetailsInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub special_requests: Option<String>,
}

/// Fields are optional so validation can report every missing field by
/// name instead of failing on the first deserialization error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub listing_id: Option<String>,
    pub user_id: Option<String>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub guests: Option<GuestsInput>,
    pub total_price: Option<f64>,
    pub guest_details: Option<GuestDetailsInput>,
    pub payment_details: Option<PaymentDetails>,
}

#[derive(Deserialize, Default)]
pub struct CancelBookingRequest {
    pub reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackageRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub listing_type: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub available_stock: Option<i64>,
    pub max_guests: Option<i64>,
    pub images: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackageRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub listing_type: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub available_stock: Option<i64>,
    pub max_guests: Option<i64>,
    pub images: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDealRequest {
    pub package_id: Option<String>,
    pub discount: Option<f64>,
    pub valid_until: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDealRequest {
    pub discount: Option<f64>,
    pub valid_until: Option<DateTime<Utc>>,
}
