//! User and session records handed to the credential store.

use crate::types::Timestamp;

/// A user about to be persisted. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// An issued session token, stored as a digest only.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub email: String,
    /// SHA-256 hex digest of the issued token.
    pub token_hash: String,
    pub expires_at: Timestamp,
}
