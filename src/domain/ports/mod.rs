use crate::domain::models::{
    account::Account,
    booking::{Booking, PaymentDetails},
    deal::Deal,
    listing::{Listing, ListingFilter},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create(&self, account: &Account) -> Result<Account, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, AppError>;
    async fn list(&self) -> Result<Vec<Account>, AppError>;
    /// Idempotent: marking an already-verified account verified is a no-op.
    async fn mark_verified(&self, id: &str) -> Result<Option<Account>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn set_reset_otp(&self, id: &str, otp_hash: &str, expires_at: DateTime<Utc>) -> Result<(), AppError>;
    /// Replaces the password hash and clears any pending reset OTP.
    async fn update_password(&self, id: &str, password_hash: &str) -> Result<(), AppError>;
    async fn touch_last_login(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn create(&self, listing: &Listing) -> Result<Listing, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Listing>, AppError>;
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, AppError>;
    async fn update(&self, listing: &Listing) -> Result<Listing, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persists the booking and, when `decrement_stock` is set, performs the
    /// conditional stock decrement in the same transaction. The decrement
    /// only applies while `available_stock >= 1`, so two racing requests
    /// against the last unit cannot both succeed.
    async fn create(&self, booking: &Booking, decrement_stock: bool) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_account(&self, account_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn cancel(&self, booking: &Booking) -> Result<Booking, AppError>;
}

#[async_trait]
pub trait DealRepository: Send + Sync {
    async fn create(&self, deal: &Deal) -> Result<Deal, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Deal>, AppError>;
    async fn list(&self) -> Result<Vec<Deal>, AppError>;
    async fn update(&self, deal: &Deal) -> Result<Deal, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Payment authorization boundary. The production implementation simulates a
/// gateway; a real integration can be substituted without touching the
/// booking flow.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn authorize(&self, payment: &PaymentDetails) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}
