use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use crate::state::AppState;
use crate::domain::models::auth::Claims;
use std::convert::Infallible;
use std::sync::Arc;

/// Guest checkout is allowed, so a missing or invalid token is not an
/// error here. An expired token simply downgrades the request to guest.
pub struct MaybeAuthUser(pub Option<Claims>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let token = parts.headers.get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let claims = match token {
            Some(token) => app_state.auth_service.verify_token(token).ok(),
            None => None,
        };

        Ok(MaybeAuthUser(claims))
    }
}
