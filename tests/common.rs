use travel_booking_backend::{
    api::router::create_router,
    config::Config,
    domain::models::account::Account,
    domain::models::listing::{Listing, NewListingParams},
    domain::ports::EmailService,
    domain::services::auth_service::AuthService,
    error::AppError,
    infra::payment::simulated_gateway::SimulatedPaymentGateway,
    infra::repositories::{
        sqlite_account_repo::SqliteAccountRepo, sqlite_booking_repo::SqliteBookingRepo,
        sqlite_deal_repo::SqliteDealRepo, sqlite_listing_repo::SqliteListingRepo,
    },
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use std::sync::{Arc, Mutex};
use tera::Tera;
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
}

/// Captures outgoing mail so tests can read the OTP out of the rendered body.
pub struct MockEmailService {
    pub outbox: Arc<Mutex<Vec<SentEmail>>>,
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError> {
        self.outbox.lock().unwrap().push(SentEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub outbox: Arc<Mutex<Vec<SentEmail>>>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_decline_rate(0.0).await
    }

    pub async fn with_decline_rate(decline_rate: f64) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut tera = Tera::default();
        tera.add_raw_template(
            "otp_email.html",
            "<html>Hi {{ name }}, your code is {{ otp }}</html>",
        )
        .unwrap();
        let templates = Arc::new(tera);

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret-not-for-production".to_string(),
            auth_issuer: "test-issuer".to_string(),
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            payment_decline_rate: decline_rate,
        };

        let outbox = Arc::new(Mutex::new(Vec::new()));
        let auth_service = Arc::new(AuthService::new(config.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            account_repo: Arc::new(SqliteAccountRepo::new(pool.clone())),
            listing_repo: Arc::new(SqliteListingRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            deal_repo: Arc::new(SqliteDealRepo::new(pool.clone())),
            auth_service,
            payment_gateway: Arc::new(SimulatedPaymentGateway::new(decline_rate)),
            email_service: Arc::new(MockEmailService { outbox: outbox.clone() }),
            templates,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            outbox,
        }
    }

    /// Inserts a verified admin account directly and returns its id.
    pub async fn seed_admin(&self, email: &str, password: &str) -> String {
        let mut account = Account::new(
            "Test Admin".to_string(),
            email.to_string(),
            AuthService::hash_password(password).unwrap(),
        );
        account.role = "admin".to_string();
        account.is_verified = true;

        let created = self
            .state
            .account_repo
            .create(&account)
            .await
            .expect("Failed to seed admin");
        created.id
    }

    /// Inserts a user account directly. `verified` controls whether it can
    /// sign in.
    pub async fn seed_user(&self, email: &str, password: &str, verified: bool) -> String {
        let mut account = Account::new(
            "Test User".to_string(),
            email.to_string(),
            AuthService::hash_password(password).unwrap(),
        );
        account.is_verified = verified;

        let created = self
            .state
            .account_repo
            .create(&account)
            .await
            .expect("Failed to seed user");
        created.id
    }

    pub async fn seed_listing(&self, title: &str, stock: Option<i64>) -> String {
        let listing = Listing::new(NewListingParams {
            title: title.to_string(),
            description: "A lovely place".to_string(),
            listing_type: "hotel".to_string(),
            city: "Lisbon".to_string(),
            country: "Portugal".to_string(),
            price: 120.0,
            currency: "USD".to_string(),
            available_stock: stock,
            max_guests: 4,
            images: vec![],
            amenities: vec!["wifi".to_string()],
            host_id: None,
        });

        let created = self
            .state
            .listing_repo
            .create(&listing)
            .await
            .expect("Failed to seed listing");
        created.id
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let payload = serde_json::json!({ "email": email, "password": password });

        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        body["token"].as_str().expect("No token in login body").to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
