//! Handlers for rating and listing movies.

use axum::extract::State;
use axum::Json;
use cinerate_core::error::{CoreError, StoreError};
use cinerate_core::movie::{validate_rating, MovieRating};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::request_context::RequestContext;
use crate::state::AppState;

/// Message returned when the submitted name matches no catalog entry.
const UNKNOWN_MOVIE_MESSAGE: &str = "searched movie does not exist";

/// Request body for `POST /rate`.
#[derive(Debug, Deserialize)]
pub struct RateMovieRequest {
    pub name: String,
    pub rating: i64,
}

#[derive(Debug, Serialize)]
pub struct RateMovieResponse {
    pub average_rating: f64,
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse<T: Serialize> {
    pub movie_list: Vec<T>,
}

/// POST /rate
///
/// Fold a 1-10 rating into the movie's running average.
pub async fn rate_movie(
    State(state): State<AppState>,
    ctx: RequestContext,
    JsonBody(input): JsonBody<RateMovieRequest>,
) -> AppResult<Json<RateMovieResponse>> {
    validate_rating(input.rating)
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let name = state
        .resolver
        .resolve(&input.name)
        .await?
        .ok_or_else(unknown_movie)?;

    let average_rating = match state.movies.update_movie_rating(&name, input.rating).await {
        Ok(average) => average,
        // Removed from the catalog between resolve and update.
        Err(StoreError::MovieNotFound(_)) => return Err(unknown_movie()),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        request_id = %ctx.request_id,
        movie = %name,
        rating = input.rating,
        average_rating,
        "Movie rated",
    );

    Ok(Json(RateMovieResponse { average_rating }))
}

/// GET /listmovies
pub async fn list_movies(
    State(state): State<AppState>,
) -> AppResult<Json<MovieListResponse<String>>> {
    let movie_list = state.movies.list_movies().await?;
    Ok(Json(MovieListResponse { movie_list }))
}

/// GET /listmovieratings
pub async fn list_movie_ratings(
    State(state): State<AppState>,
) -> AppResult<Json<MovieListResponse<MovieRating>>> {
    let movie_list = state.movies.list_movie_ratings().await?;
    Ok(Json(MovieListResponse { movie_list }))
}

fn unknown_movie() -> AppError {
    AppError::Core(CoreError::Validation(UNKNOWN_MOVIE_MESSAGE.into()))
}
