//! Translation of sqlx errors into [`StoreError`].

use cinerate_core::error::StoreError;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Classify a sqlx error for the store-adapter boundary.
///
/// - Unique constraint violations (constraint name starting with `uq_`)
///   become [`StoreError::Duplicate`].
/// - Everything else becomes [`StoreError::Backend`].
pub fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return StoreError::Duplicate(format!(
                    "value violates unique constraint {constraint}"
                ));
            }
        }
    }
    StoreError::Backend(err.to_string())
}
