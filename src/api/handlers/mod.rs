pub mod admin;
pub mod auth;
pub mod booking;
pub mod deal;
pub mod health;
pub mod listing;
