use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub auth_issuer: String,
    pub mail_service_url: String,
    pub mail_service_token: String,
    /// Probability in [0, 1] that the simulated gateway declines a payment.
    pub payment_decline_rate: f64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://api.travel-booking.local".to_string()),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            payment_decline_rate: env::var("PAYMENT_DECLINE_RATE")
                .unwrap_or_else(|_| "0.05".to_string())
                .parse()
                .expect("PAYMENT_DECLINE_RATE must be a number between 0 and 1"),
        }
    }
}
