#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// Failure reported by a store adapter.
///
/// Adapters classify their driver errors into these variants so handlers
/// never see database-specific types.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// The addressed movie is not in the catalog.
    #[error("Movie not found: {0}")]
    MovieNotFound(String),

    /// Connectivity, query, or any other backend failure.
    #[error("Store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
