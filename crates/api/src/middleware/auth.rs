//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use cinerate_core::error::CoreError;
use cinerate_core::types::Timestamp;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Session owner extracted from a JWT Bearer token in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The email the token was issued to (from `claims.sub`).
    pub email: String,
    pub expires_at: Timestamp,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        let expires_at = chrono::DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser {
            email: claims.sub,
            expires_at,
        })
    }
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}
