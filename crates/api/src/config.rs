use std::net::IpAddr;

use axum::http::HeaderValue;

use crate::auth::jwt::JwtConfig;

/// Error raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which store adapters the server runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL via sqlx.
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    /// Process-local maps seeded with the default catalog. Data is lost on
    /// restart.
    Memory,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret (and the database URL for the
/// Postgres backend) have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub store: StoreBackend,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default                  |
    /// |----------------------------|--------------------------|
    /// | `HOST`                     | `0.0.0.0`                |
    /// | `PORT`                     | `8080`                   |
    /// | `CORS_ORIGINS`             | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                     |
    /// | `STORE_BACKEND`            | `postgres`               |
    /// | `DATABASE_URL`             | required for `postgres`  |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`                     |
    /// | `JWT_SECRET`               | required                 |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | `60`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or(&lookup, "HOST", "0.0.0.0")?;
        let port = parse_or(&lookup, "PORT", "8080")?;
        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", "30")?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                // Credentialed CORS cannot use a wildcard origin.
                if origin == "*" {
                    return Err(ConfigError::Invalid {
                        key: "CORS_ORIGINS",
                        value: origin.to_string(),
                        reason: "wildcard origin is not allowed with credentials".into(),
                    });
                }
                origin.parse::<HeaderValue>().map_err(|e| ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let backend = lookup("STORE_BACKEND").unwrap_or_else(|| "postgres".into());
        let store = match backend.to_ascii_lowercase().as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    &cinerate_db::DEFAULT_MAX_CONNECTIONS.to_string(),
                )?,
            },
            "memory" => StoreBackend::Memory,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "STORE_BACKEND",
                    value: backend,
                    reason: "expected 'postgres' or 'memory'".into(),
                })
            }
        };

        let jwt = JwtConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store,
            jwt,
        })
    }
}

/// Read `key` (or `default` when unset) and parse it.
pub(crate) fn parse_or<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = lookup(key).unwrap_or_else(|| default.to_string());
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_memory_backend() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .expect("config should load");

        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.cors_origins, vec![HeaderValue::from_static("http://localhost:3000")]);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.jwt.access_token_expiry_mins, 60);
    }

    #[test]
    fn test_postgres_backend_requires_database_url() {
        let result = ServerConfig::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")]));
        assert_matches!(result, Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_postgres_backend() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/cinerate"),
            ("DATABASE_MAX_CONNECTIONS", "5"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .expect("config should load");

        assert_eq!(
            config.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/cinerate".into(),
                max_connections: 5,
            }
        );
    }

    #[test]
    fn test_invalid_port_is_reported() {
        let result = ServerConfig::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("JWT_SECRET", "s3cret"),
            ("PORT", "eighty"),
        ]));
        assert_matches!(result, Err(ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn test_unknown_backend_is_reported() {
        let result = ServerConfig::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "sqlite"),
            ("JWT_SECRET", "s3cret"),
        ]));
        assert_matches!(result, Err(ConfigError::Invalid { key: "STORE_BACKEND", .. }));
    }

    #[test]
    fn test_cors_origins_are_split_and_trimmed() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("JWT_SECRET", "s3cret"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .expect("config should load");
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[1], "http://b.test");
    }

    #[test]
    fn test_wildcard_cors_origin_is_rejected() {
        for origins in ["*", "http://a.test, *"] {
            let result = ServerConfig::from_lookup(lookup_from(&[
                ("STORE_BACKEND", "memory"),
                ("JWT_SECRET", "s3cret"),
                ("CORS_ORIGINS", origins),
            ]));
            assert_matches!(
                result,
                Err(ConfigError::Invalid { key: "CORS_ORIGINS", .. }),
                "{origins} must be rejected"
            );
        }
    }
}
