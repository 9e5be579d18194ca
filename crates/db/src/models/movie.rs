//! Movie catalog entity model.

use cinerate_core::movie::MovieRating;
use cinerate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full row from the `movies` table.
#[derive(Debug, Clone, FromRow)]
pub struct Movie {
    pub id: DbId,
    pub name: String,
    pub average_rating: f64,
    pub rating_count: i64,
    pub updated_at: Timestamp,
}

impl From<Movie> for MovieRating {
    fn from(movie: Movie) -> Self {
        Self {
            name: movie.name,
            average_rating: movie.average_rating,
            rating_count: movie.rating_count,
        }
    }
}
