//! Store-adapter traits.
//!
//! Handlers depend only on these traits; concrete adapters (Postgres,
//! in-memory) live in the persistence crate and are injected at startup.
//! Dropping a returned future cancels the underlying store call.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::movie::MovieRating;
use crate::user::{NewSession, NewUser};

/// Credential store: user existence, creation, and verification.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Whether a user with this email is registered.
    async fn user_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Persist a new user. A duplicate email yields [`StoreError::Duplicate`].
    async fn create_user(&self, user: &NewUser) -> Result<(), StoreError>;

    /// Whether `password` matches the stored credentials for `email`.
    ///
    /// An unknown email is reported as `Ok(false)`.
    async fn check_user_credentials(&self, email: &str, password: &str)
        -> Result<bool, StoreError>;

    /// Record the digest of an issued session token.
    async fn record_session(&self, session: &NewSession) -> Result<(), StoreError>;

    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Movie catalog store.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Case-insensitive exact title lookup, returning the catalog name.
    async fn find_title(&self, name: &str) -> Result<Option<String>, StoreError>;

    /// Atomically fold `rating` into the movie's running average and
    /// return the new average.
    async fn update_movie_rating(&self, name: &str, rating: i64) -> Result<f64, StoreError>;

    /// All catalog names, ordered by name.
    async fn list_movies(&self) -> Result<Vec<String>, StoreError>;

    /// All catalog entries with their aggregates, ordered by name.
    async fn list_movie_ratings(&self) -> Result<Vec<MovieRating>, StoreError>;

    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Resolves free-text movie input to a canonical catalog name.
#[async_trait]
pub trait MovieResolver: Send + Sync {
    async fn resolve(&self, input: &str) -> Result<Option<String>, StoreError>;
}
