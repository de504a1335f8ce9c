//! Registered users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use accrue_core::{DomainError, DomainResult, Entity, UserId, ValueObject};

const MAX_EMAIL_LEN: usize = 254;

/// Normalised (trimmed, lower-cased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let email = raw.trim().to_lowercase();

        if email.is_empty() {
            return Err(DomainError::validation("email cannot be empty"));
        }
        if email.len() > MAX_EMAIL_LEN {
            return Err(DomainError::validation("email is too long"));
        }
        if email.chars().any(char::is_whitespace) {
            return Err(DomainError::validation("email cannot contain whitespace"));
        }

        let mut parts = email.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(DomainError::validation("invalid email format")),
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Email {}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered account.
///
/// # Invariants
/// - `email` is unique across users (enforced by the store).
/// - `password_hash` is a PHC string and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, email: Email, password_hash: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at,
        }
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
