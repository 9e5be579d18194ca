//! In-process store adapters.
//!
//! Used for local runs without PostgreSQL (`STORE_BACKEND=memory`) and by
//! the HTTP integration tests. State lives behind a `tokio` `RwLock`;
//! rating folds happen under the write lock so they are atomic per store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use cinerate_core::error::StoreError;
use cinerate_core::movie::{fold_rating, MovieRating, RatingAggregate};
use cinerate_core::password::verify_password;
use cinerate_core::ports::{MovieStore, UserStore};
use cinerate_core::user::{NewSession, NewUser};
use tokio::sync::RwLock;

/// Titles the catalog starts with; mirrors the seed migration.
pub const SEED_CATALOG: &[&str] = &[
    "12 Angry Men",
    "Casablanca",
    "Inception",
    "Interstellar",
    "Parasite",
    "Pulp Fiction",
    "Spirited Away",
    "The Dark Knight",
    "The Godfather",
    "The Matrix",
    "The Shawshank Redemption",
];

/// [`UserStore`] kept in memory, keyed by email.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, NewUser>>,
    sessions: RwLock<Vec<NewSession>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions recorded for `email`.
    pub async fn session_count(&self, email: &str) -> usize {
        self.sessions
            .read()
            .await
            .iter()
            .filter(|s| s.email == email)
            .count()
    }

    /// Number of registered users.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn user_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.users.read().await.contains_key(email))
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(StoreError::Duplicate(format!(
                "user with email {} already exists",
                user.email
            )));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn check_user_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<bool, StoreError> {
        let Some(stored_hash) = self
            .users
            .read()
            .await
            .get(email)
            .map(|user| user.password_hash.clone())
        else {
            return Ok(false);
        };
        // The lock is released before the slow hash comparison.
        verify_password(password, &stored_hash)
            .map_err(|e| StoreError::backend(format!("unreadable password hash: {e}")))
    }

    async fn record_session(&self, session: &NewSession) -> Result<(), StoreError> {
        if !self.users.read().await.contains_key(&session.email) {
            return Err(StoreError::backend(format!(
                "no user for session owner {}",
                session.email
            )));
        }
        self.sessions.write().await.push(session.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// [`MovieStore`] kept in memory, ordered by name.
#[derive(Default)]
pub struct MemoryMovieStore {
    movies: RwLock<BTreeMap<String, RatingAggregate>>,
}

impl MemoryMovieStore {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog with the given titles, each with no ratings yet.
    pub fn with_catalog<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let movies = titles
            .into_iter()
            .map(|t| {
                (
                    t.into(),
                    RatingAggregate {
                        average_rating: 0.0,
                        rating_count: 0,
                    },
                )
            })
            .collect();
        Self {
            movies: RwLock::new(movies),
        }
    }

    /// Set a movie's aggregate directly, adding the title if missing.
    pub async fn set_aggregate(&self, name: &str, aggregate: RatingAggregate) {
        self.movies.write().await.insert(name.to_string(), aggregate);
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn find_title(&self, name: &str) -> Result<Option<String>, StoreError> {
        let needle = name.to_lowercase();
        Ok(self
            .movies
            .read()
            .await
            .keys()
            .find(|title| title.to_lowercase() == needle)
            .cloned())
    }

    async fn update_movie_rating(&self, name: &str, rating: i64) -> Result<f64, StoreError> {
        let mut movies = self.movies.write().await;
        let aggregate = movies
            .get_mut(name)
            .ok_or_else(|| StoreError::MovieNotFound(name.to_string()))?;
        *aggregate = fold_rating(*aggregate, rating);
        Ok(aggregate.average_rating)
    }

    async fn list_movies(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.movies.read().await.keys().cloned().collect())
    }

    async fn list_movie_ratings(&self) -> Result<Vec<MovieRating>, StoreError> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .map(|(name, aggregate)| MovieRating {
                name: name.clone(),
                average_rating: aggregate.average_rating,
                rating_count: aggregate.rating_count,
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
