//! Interest engine: simple and compound interest as pure functions.
//!
//! No IO, no failure modes, no rounding. Presentation concerns (rounding,
//! currency formatting) belong to callers.

pub mod engine;
pub mod kind;

pub use engine::{Computation, compound_interest, compute, simple_interest};
pub use kind::{InterestKind, UnknownInterestKind};
