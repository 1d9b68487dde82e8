pub mod sqlite_account_repo;
pub mod sqlite_listing_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_deal_repo;
pub mod postgres_account_repo;
pub mod postgres_listing_repo;
pub mod postgres_booking_repo;
pub mod postgres_deal_repo;
