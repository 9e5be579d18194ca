//! Repository for the `user_sessions` table.

use cinerate_core::types::Timestamp;
use sqlx::PgPool;

/// Persists digests of issued session tokens.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a session row for the user owning `email`.
    ///
    /// Returns `false` when no such user exists.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_sessions (user_id, token_hash, expires_at)
             SELECT id, $2, $3 FROM users WHERE email = $1",
        )
        .bind(email)
        .bind(token_hash)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count sessions recorded for a user.
    pub async fn count_for_email(pool: &PgPool, email: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_sessions s
             JOIN users u ON u.id = s.user_id
             WHERE u.email = $1",
        )
        .bind(email)
        .fetch_one(pool)
        .await
    }
}
