//! Process configuration read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `BIND_ADDR` | `0.0.0.0:8080` |
//! | `JWT_SECRET` | insecure dev secret (with a warning) |
//! | `TOKEN_TTL_MINUTES` | `60` |
//! | `USE_PERSISTENT_STORES` | `false` |
//! | `DATABASE_URL` | required when persistent stores are on |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |

use std::net::SocketAddr;

use thiserror::Error;
use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEV_JWT_SECRET: &str = "dev-secret";
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be set when USE_PERSISTENT_STORES=true")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub storage: StorageConfig,
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"***")
            .field("token_ttl", &self.token_ttl)
            .field("storage", &self.storage)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr: SocketAddr = parse_or(&lookup, "BIND_ADDR", || {
            DEFAULT_BIND_ADDR
                .parse()
                .map_err(|e: std::net::AddrParseError| e.to_string())
        })?;

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            }
        };

        let ttl_minutes: i64 = parse_or(&lookup, "TOKEN_TTL_MINUTES", || Ok(DEFAULT_TOKEN_TTL_MINUTES))?;
        if ttl_minutes <= 0 {
            return Err(ConfigError::Invalid {
                var: "TOKEN_TTL_MINUTES",
                value: ttl_minutes.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        let token_ttl = chrono::Duration::try_minutes(ttl_minutes).ok_or_else(|| ConfigError::Invalid {
            var: "TOKEN_TTL_MINUTES",
            value: ttl_minutes.to_string(),
            reason: "too large".to_string(),
        })?;

        let use_persistent: bool = parse_or(&lookup, "USE_PERSISTENT_STORES", || Ok(false))?;
        let storage = if use_persistent {
            let database_url = lookup("DATABASE_URL")
                .filter(|s| !s.is_empty())
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            let max_connections =
                parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", || Ok(DEFAULT_MAX_CONNECTIONS))?;
            StorageConfig::Postgres {
                database_url,
                max_connections,
            }
        } else {
            StorageConfig::InMemory
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            token_ttl,
            storage,
        })
    }

    /// In-memory configuration with a fixed secret, for tests and local runs.
    pub fn in_memory(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            jwt_secret: jwt_secret.into(),
            token_ttl: chrono::Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
            storage: StorageConfig::InMemory,
        }
    }
}

fn parse_or<T, F, D>(lookup: &F, var: &'static str, default: D) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: core::fmt::Display,
    F: Fn(&str) -> Option<String>,
    D: FnOnce() -> Result<T, String>,
{
    match lookup(var).filter(|s| !s.trim().is_empty()) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => default().map_err(|reason| ConfigError::Invalid {
            var,
            value: String::new(),
            reason,
        }),
    }
}
