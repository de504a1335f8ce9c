use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How interest accrues over the duration of an investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestKind {
    /// Linear on the principal only.
    Simple,
    /// Compounded once per year on principal plus accrued interest.
    Compound,
}

impl InterestKind {
    pub const ALL: [InterestKind; 2] = [InterestKind::Simple, InterestKind::Compound];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterestKind::Simple => "simple",
            InterestKind::Compound => "compound",
        }
    }
}

impl core::fmt::Display for InterestKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The submitted kind is neither `simple` nor `compound`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized interest kind '{0}' (expected 'simple' or 'compound')")]
pub struct UnknownInterestKind(pub String);

impl FromStr for InterestKind {
    type Err = UnknownInterestKind;

    /// Exact, case-sensitive match on the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(InterestKind::Simple),
            "compound" => Ok(InterestKind::Compound),
            other => Err(UnknownInterestKind(other.to_string())),
        }
    }
}
