//! JWT access-token generation and validation.
//!
//! Access tokens are HS256-signed JWTs whose subject is the user's email.
//! Only the SHA-256 digest of an issued token is persisted server-side.

use cinerate_core::types::Timestamp;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::{parse_or, ConfigError};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's email.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration through a key lookup.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `60`    |
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let access_token_expiry_mins: i64 = parse_or(
            lookup,
            "JWT_ACCESS_EXPIRY_MINS",
            &DEFAULT_ACCESS_EXPIRY_MINS.to_string(),
        )?;
        if access_token_expiry_mins <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY_MINS",
                value: access_token_expiry_mins.to_string(),
                reason: "must be positive".into(),
            });
        }

        Ok(Self {
            secret,
            access_token_expiry_mins,
        })
    }

    /// Access token lifetime in seconds.
    pub fn expires_in_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }
}

/// A freshly signed access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Sign an HS256 access token for the given email.
pub fn generate_access_token(
    email: &str,
    config: &JwtConfig,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::minutes(config.access_token_expiry_mins);

    let claims = Claims {
        sub: email.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(IssuedToken { token, expires_at })
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature and expiry.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// SHA-256 hex digest of a token, as stored in the session table.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
