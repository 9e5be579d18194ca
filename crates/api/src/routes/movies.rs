//! Route definitions for the movie catalog.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// ```text
/// POST /rate              -> rate_movie
/// GET  /listmovies        -> list_movies
/// GET  /listmovieratings  -> list_movie_ratings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rate", post(movies::rate_movie))
        .route("/listmovies", get(movies::list_movies))
        .route("/listmovieratings", get(movies::list_movie_ratings))
}
