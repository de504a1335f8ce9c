//! Closed-form interest formulas.

use serde::{Deserialize, Serialize};

use crate::InterestKind;

/// Simple interest: `principal * rate * time / 100`.
///
/// `rate` is a percentage per year, `time` is in years.
pub fn simple_interest(principal: f64, rate: f64, time: f64) -> f64 {
    (principal * rate * time) / 100.0
}

/// Compound interest, compounded once per year: `principal * ((1 + rate/100)^time - 1)`.
pub fn compound_interest(principal: f64, rate: f64, time: f64) -> f64 {
    principal * ((1.0 + rate / 100.0).powf(time) - 1.0)
}

/// Interest accrued and the resulting total for one set of terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Computation {
    pub interest: f64,
    /// Always `principal + interest`.
    pub total: f64,
}

/// Select the formula by `kind` and derive the total.
pub fn compute(kind: InterestKind, principal: f64, rate: f64, time: f64) -> Computation {
    let interest = match kind {
        InterestKind::Simple => simple_interest(principal, rate, time),
        InterestKind::Compound => compound_interest(principal, rate, time),
    };

    Computation {
        interest,
        total: principal + interest,
    }
}
