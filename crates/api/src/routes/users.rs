//! Route definitions for accounts and sessions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{session, users};
use crate::state::AppState;

/// ```text
/// POST /users    -> register
/// POST /login    -> login
/// GET  /session  -> current_session (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::register))
        .route("/login", post(users::login))
        .route("/session", get(session::current_session))
}
