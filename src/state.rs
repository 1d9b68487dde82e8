use std::sync::Arc;
use crate::domain::ports::{
    AccountRepository, BookingRepository, DealRepository, EmailService,
    ListingRepository, PaymentGateway,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub account_repo: Arc<dyn AccountRepository>,
    pub listing_repo: Arc<dyn ListingRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub deal_repo: Arc<dyn DealRepository>,
    pub auth_service: Arc<AuthService>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub email_service: Arc<dyn EmailService>,
    pub templates: Arc<Tera>,
}
