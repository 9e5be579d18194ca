//! Handler for inspecting the caller's session token.

use axum::Json;
use cinerate_core::types::Timestamp;
use serde::Serialize;

use crate::middleware::auth::AuthUser;

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub email: String,
    pub expires_at: Timestamp,
}

/// GET /session
///
/// Returns the identity bound to the presented Bearer token.
pub async fn current_session(auth: AuthUser) -> Json<SessionInfo> {
    Json(SessionInfo {
        email: auth.email,
        expires_at: auth.expires_at,
    })
}
