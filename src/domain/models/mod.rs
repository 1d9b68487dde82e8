pub mod account;
pub mod auth;
pub mod booking;
pub mod deal;
pub mod listing;
