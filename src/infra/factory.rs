use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::services::auth_service::AuthService;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::payment::simulated_gateway::SimulatedPaymentGateway;
use crate::infra::repositories::{
    postgres_account_repo::PostgresAccountRepo, postgres_booking_repo::PostgresBookingRepo,
    postgres_deal_repo::PostgresDealRepo, postgres_listing_repo::PostgresListingRepo,
    sqlite_account_repo::SqliteAccountRepo, sqlite_booking_repo::SqliteBookingRepo,
    sqlite_deal_repo::SqliteDealRepo, sqlite_listing_repo::SqliteListingRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    let payment_gateway = Arc::new(SimulatedPaymentGateway::new(config.payment_decline_rate));
    let auth_service = Arc::new(AuthService::new(config.clone()));

    let mut tera = Tera::default();
    tera.add_raw_template("otp_email.html", include_str!("../templates/otp_email.html"))
        .expect("Failed to load OTP email template");
    let templates = Arc::new(tera);

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            account_repo: Arc::new(PostgresAccountRepo::new(pool.clone())),
            listing_repo: Arc::new(PostgresListingRepo::new(pool.clone())),
            booking_repo: Arc::new(PostgresBookingRepo::new(pool.clone())),
            deal_repo: Arc::new(PostgresDealRepo::new(pool.clone())),
            auth_service,
            payment_gateway,
            email_service,
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            account_repo: Arc::new(SqliteAccountRepo::new(pool.clone())),
            listing_repo: Arc::new(SqliteListingRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            deal_repo: Arc::new(SqliteDealRepo::new(pool.clone())),
            auth_service,
            payment_gateway,
            email_service,
            templates,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
