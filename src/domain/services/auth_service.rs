use crate::domain::models::{account::Account, auth::Claims};
use crate::error::AppError;
use crate::config::Config;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use argon2::{password_hash::{PasswordHash, SaltString, PasswordHasher}, Argon2, PasswordVerifier};
use rand::rngs::OsRng;
use chrono::{Utc, Duration};
use sha2::{Digest, Sha256};

pub struct AuthService {
    config: Config,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(config: Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        Self { config, encoding_key, decoding_key }
    }

    /// Issues a signed token valid for one hour. Callers are responsible for
    /// the verification gate: an unverified account must never reach this.
    pub fn issue_token(&self, account: &Account) -> Result<String, AppError> {
        let now = Utc::now();

        let claims = Claims {
            iss: self.config.auth_issuer.clone(),
            sub: account.id.clone(),
            email: account.email.clone(),
            role: account.role.clone(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(1)).timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidCredentials)
    }

    pub fn hash_password(password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| AppError::Internal)
    }

    pub fn verify_password(hash: &str, password: &str) -> Result<(), AppError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AppError::Internal)?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::InvalidCredentials)
    }

    /// OTPs are stored hashed; only the digest ever touches the database.
    pub fn hash_otp(otp: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(otp.as_bytes());
        hex::encode(hasher.finalize())
    }
}
