//! Handlers for registration (`POST /users`) and login (`POST /login`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cinerate_core::error::{CoreError, StoreError};
use cinerate_core::password::hash_password;
use cinerate_core::user::{NewSession, NewUser};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, hash_token};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::request_context::RequestContext;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`. Only the shape is checked; field
/// contents are stored as submitted.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Echo of the registered user. The password is never returned.
#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub name: String,
    pub email: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /users
///
/// Register a new user. Returns 201 with the name and email.
pub async fn register(
    State(state): State<AppState>,
    ctx: RequestContext,
    JsonBody(input): JsonBody<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisteredUser>)> {
    if state.users.user_exists(&input.email).await? {
        tracing::warn!(request_id = %ctx.request_id, email = %input.email, "User already exists");
        return Err(user_already_exists());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = NewUser {
        name: input.name,
        email: input.email,
        password_hash,
    };
    // A concurrent registration can win between the check and the insert.
    state.users.create_user(&user).await.map_err(|e| match e {
        StoreError::Duplicate(_) => user_already_exists(),
        other => AppError::Store(other),
    })?;

    tracing::info!(request_id = %ctx.request_id, email = %user.email, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisteredUser {
            name: user.name,
            email: user.email,
        }),
    ))
}

/// POST /login
///
/// Authenticate with email + password. Returns a signed access token.
pub async fn login(
    State(state): State<AppState>,
    ctx: RequestContext,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // 1. The user must exist.
    if !state.users.user_exists(&input.email).await? {
        tracing::warn!(request_id = %ctx.request_id, email = %input.email, "Login for unknown user");
        return Err(AppError::Core(CoreError::NotFound("user does not exist".into())));
    }

    // 2. Verify credentials.
    let valid = state
        .users
        .check_user_credentials(&input.email, &input.password)
        .await?;
    if !valid {
        tracing::warn!(request_id = %ctx.request_id, email = %input.email, "Invalid credentials");
        return Err(AppError::Core(CoreError::Unauthorized(
            "user with entered credentials does not exist".into(),
        )));
    }

    // 3. Issue the token and record its digest.
    let issued = generate_access_token(&input.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let session = NewSession {
        email: input.email,
        token_hash: hash_token(&issued.token),
        expires_at: issued.expires_at,
    };
    state.users.record_session(&session).await?;

    tracing::info!(request_id = %ctx.request_id, email = %session.email, "User logged in");

    Ok(Json(LoginResponse {
        access_token: issued.token,
        token_type: "Bearer",
        expires_in: state.config.jwt.expires_in_secs(),
    }))
}

fn user_already_exists() -> AppError {
    AppError::Core(CoreError::Conflict("user already exists".into()))
}
