//! HS256 bearer tokens.
//!
//! Signature checks happen here; time-window checks are delegated to
//! [`validate_claims`] with an injected `now` so they stay deterministic.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use accrue_core::UserId;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

/// Verifies a bearer token and yields its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to sign token: {0}")]
pub struct TokenSigningError(String);

/// A freshly signed token and the instant it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Registered claim names on the wire (`sub`, `iat`, `exp` in seconds).
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Shared-secret token issuer and validator.
#[derive(Clone)]
pub struct Hs256Jwt {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl core::fmt::Debug for Hs256Jwt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256Jwt")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl Hs256Jwt {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `sub`, valid from `now` (truncated to seconds) for the configured TTL.
    pub fn issue(&self, sub: UserId, now: DateTime<Utc>) -> Result<IssuedToken, TokenSigningError> {
        let iat = now.timestamp();
        let exp = iat + self.ttl.num_seconds();
        let wire = WireClaims {
            sub: sub.to_string(),
            iat,
            exp,
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &wire, &self.encoding)
            .map_err(|e| TokenSigningError(e.to_string()))?;
        let expires_at = DateTime::<Utc>::from_timestamp(exp, 0)
            .ok_or_else(|| TokenSigningError(format!("expiry {exp} out of range")))?;

        Ok(IssuedToken { token, expires_at })
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `validate_claims` against the caller's clock.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);
        validation
    }
}

impl JwtValidator for Hs256Jwt {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        let data = jsonwebtoken::decode::<WireClaims>(token, &self.decoding, &Self::validation())
            .map_err(|e| TokenValidationError::Invalid(e.to_string()))?;
        let wire = data.claims;

        let sub: UserId = wire
            .sub
            .parse()
            .map_err(|e: accrue_core::DomainError| TokenValidationError::Invalid(e.to_string()))?;
        let issued_at = DateTime::<Utc>::from_timestamp(wire.iat, 0)
            .ok_or_else(|| TokenValidationError::Invalid("iat out of range".to_string()))?;
        let expires_at = DateTime::<Utc>::from_timestamp(wire.exp, 0)
            .ok_or_else(|| TokenValidationError::Invalid("exp out of range".to_string()))?;

        let claims = JwtClaims {
            sub,
            issued_at,
            expires_at,
        };
        validate_claims(&claims, now)?;
        Ok(claims)
    }
}
