pub mod health;
pub mod movies;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// POST /users              register
/// POST /login              login
/// GET  /session            current session (requires Bearer token)
///
/// POST /rate               rate a movie
/// GET  /listmovies         catalog names
/// GET  /listmovieratings   catalog with rating aggregates
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(movies::router())
}
