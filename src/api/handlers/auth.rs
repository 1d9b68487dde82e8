use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::account::Account;
use crate::domain::services::auth_service::AuthService;
use crate::error::AppError;
use std::sync::Arc;
use chrono::{Duration, Utc};
use rand::Rng;
use tracing::info;

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.filter(|v| !v.is_empty());
    let email = payload.email.filter(|v| !v.is_empty());
    let password = payload.password.filter(|v| !v.is_empty());

    let (name, email, password) = match (name, email, password) {
        (Some(n), Some(e), Some(p)) => (n, e, p),
        _ => return Err(AppError::Validation("Name, email, and password are required".to_string())),
    };

    if state.account_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let password_hash = AuthService::hash_password(&password)?;
    let account = Account::new(name, email, password_hash);
    let created = state.account_repo.create(&account).await?;

    info!("Account registered, pending approval: {}", created.id);

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "message": "Registration successful! Your account is pending admin approval. You will be able to login once approved.",
        "result": { "name": created.name, "email": created.email }
    }))))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (email, password) = match (payload.email, payload.password) {
        (Some(e), Some(p)) => (e, p),
        _ => return Err(AppError::Validation("Email and password are required".to_string())),
    };

    let account = state.account_repo.find_by_email(&email).await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    // Checked before the password comparison: unverified accounts never
    // reach the hash verification at all.
    if !account.is_verified {
        return Err(AppError::Forbidden(
            "Your account is pending admin approval. Please wait for approval before logging in.".to_string()
        ));
    }

    AuthService::verify_password(&account.password_hash, &password)?;

    let token = state.auth_service.issue_token(&account)?;
    state.account_repo.touch_last_login(&account.id).await?;

    info!("User logged in: {}", account.id);

    Ok(Json(serde_json::json!({
        "result": account,
        "token": token
    })))
}

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload.email.filter(|v| !v.is_empty())
        .ok_or(AppError::Validation("Email is required".to_string()))?;

    let account = state.account_repo.find_by_email(&email).await?
        .ok_or(AppError::NotFound("No account found with this email address".to_string()))?;

    let otp = { rand::thread_rng().gen_range(100_000..1_000_000) }.to_string();
    let expires_at = Utc::now() + Duration::minutes(10);

    state.account_repo.set_reset_otp(&account.id, &AuthService::hash_otp(&otp), expires_at).await?;

    let mut ctx = tera::Context::new();
    ctx.insert("name", &account.name);
    ctx.insert("otp", &otp);
    let body = state.templates.render("otp_email.html", &ctx)
        .map_err(|_| AppError::Internal)?;

    state.email_service.send(&account.email, "Your password reset code", &body).await?;

    info!("Password reset OTP sent for account {}", account.id);

    Ok(Json(serde_json::json!({
        "message": "OTP sent successfully to your email",
        "email": email
    })))
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (email, otp, new_password) = match (payload.email, payload.otp, payload.new_password) {
        (Some(e), Some(o), Some(p)) => (e, o, p),
        _ => return Err(AppError::Validation("Email, OTP, and new password are required".to_string())),
    };

    let account = state.account_repo.find_by_email(&email).await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    let stored_hash = account.reset_otp_hash
        .ok_or(AppError::Validation("No OTP found. Please request a new one.".to_string()))?;

    let expired = account.reset_otp_expires_at
        .map(|at| at < Utc::now())
        .unwrap_or(true);
    if expired {
        return Err(AppError::Validation("OTP has expired. Please request a new one.".to_string()));
    }

    if AuthService::hash_otp(&otp) != stored_hash {
        return Err(AppError::Validation("Invalid OTP".to_string()));
    }

    let password_hash = AuthService::hash_password(&new_password)?;
    state.account_repo.update_password(&account.id, &password_hash).await?;

    info!("Password reset for account {}", account.id);

    Ok(Json(serde_json::json!({
        "message": "Password reset successful. You can now login with your new password."
    })))
}

pub async fn profile(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let account = state.account_repo.find_by_id(&claims.sub).await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(account))
}
