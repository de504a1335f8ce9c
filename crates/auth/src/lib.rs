//! `accrue-auth` — identity and authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod jwt;
pub mod password;
pub mod user;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256Jwt, IssuedToken, JwtValidator};
pub use password::{CredentialError, Password, PasswordHasher};
pub use user::{Email, User};
