//! PostgreSQL-backed store adapters.

use async_trait::async_trait;
use cinerate_core::error::StoreError;
use cinerate_core::movie::MovieRating;
use cinerate_core::password::verify_password;
use cinerate_core::ports::{MovieStore, UserStore};
use cinerate_core::user::{NewSession, NewUser};

use crate::error::map_sqlx_error;
use crate::repositories::{MovieRepo, SessionRepo, UserRepo};
use crate::DbPool;

/// [`UserStore`] over the `users` and `user_sessions` tables.
#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn user_exists(&self, email: &str) -> Result<bool, StoreError> {
        UserRepo::exists_by_email(&self.pool, email)
            .await
            .map_err(map_sqlx_error)
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), StoreError> {
        let row = UserRepo::create(&self.pool, &user.name, &user.email, &user.password_hash)
            .await
            .map_err(map_sqlx_error)?;
        tracing::debug!(user_id = row.id, email = %row.email, "User row inserted");
        Ok(())
    }

    async fn check_user_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<bool, StoreError> {
        let Some(user) = UserRepo::find_by_email(&self.pool, email)
            .await
            .map_err(map_sqlx_error)?
        else {
            return Ok(false);
        };

        verify_password(password, &user.password_hash)
            .map_err(|e| StoreError::backend(format!("unreadable password hash: {e}")))
    }

    async fn record_session(&self, session: &NewSession) -> Result<(), StoreError> {
        let inserted = SessionRepo::create(
            &self.pool,
            &session.email,
            &session.token_hash,
            session.expires_at,
        )
        .await
        .map_err(map_sqlx_error)?;

        if !inserted {
            return Err(StoreError::backend(format!(
                "no user row for session owner {}",
                session.email
            )));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(map_sqlx_error)
    }
}

/// [`MovieStore`] over the `movies` table.
#[derive(Clone)]
pub struct PgMovieStore {
    pool: DbPool,
}

impl PgMovieStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn find_title(&self, name: &str) -> Result<Option<String>, StoreError> {
        let movie = MovieRepo::find_by_name_ci(&self.pool, name)
            .await
            .map_err(map_sqlx_error)?;
        Ok(movie.map(|m| m.name))
    }

    async fn update_movie_rating(&self, name: &str, rating: i64) -> Result<f64, StoreError> {
        let movie = MovieRepo::apply_rating(&self.pool, name, rating)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| StoreError::MovieNotFound(name.to_string()))?;
        Ok(movie.average_rating)
    }

    async fn list_movies(&self) -> Result<Vec<String>, StoreError> {
        MovieRepo::list_names(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn list_movie_ratings(&self) -> Result<Vec<MovieRating>, StoreError> {
        let rows = MovieRepo::list(&self.pool).await.map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(MovieRating::from).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(map_sqlx_error)
    }
}
