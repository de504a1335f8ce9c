//! Investment records (append-only, owner-scoped).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod investment;
pub mod submission;

pub use investment::{Investment, InvestmentParts};
pub use submission::{InvestmentError, InvestmentSubmission, InvestmentTerms};
