//! Repository for the `movies` catalog table.

use sqlx::PgPool;

use crate::models::movie::Movie;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, average_rating, rating_count, updated_at";

/// Provides lookup, listing, and rating updates for the catalog.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a catalog entry with an empty aggregate.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (name) VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Case-insensitive exact name match.
    pub async fn find_by_name_ci(pool: &PgPool, name: &str) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE lower(name) = lower($1)");
        sqlx::query_as::<_, Movie>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Fold one rating into the running average in a single statement.
    ///
    /// The row lock taken by `UPDATE` serializes concurrent submissions for
    /// the same movie. Returns `None` if no row with `name` exists.
    pub async fn apply_rating(
        pool: &PgPool,
        name: &str,
        rating: i64,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                average_rating = (average_rating * rating_count + $2) / (rating_count + 1),
                rating_count = rating_count + 1,
                updated_at = NOW()
             WHERE name = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(name)
            .bind(rating as f64)
            .fetch_optional(pool)
            .await
    }

    /// List all catalog entries ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY name");
        sqlx::query_as::<_, Movie>(&query).fetch_all(pool).await
    }

    /// List only catalog names ordered by name.
    pub async fn list_names(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT name FROM movies ORDER BY name")
            .fetch_all(pool)
            .await
    }
}
