//! Turning caller-supplied text into validated investment terms.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use accrue_interest::{InterestKind, UnknownInterestKind};

/// Rejections raised before any record is created.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvestmentError {
    /// A numeric field does not parse as a finite real number.
    #[error("malformed {field}: '{value}' is not a real number")]
    MalformedInput { field: &'static str, value: String },

    #[error(transparent)]
    UnrecognizedKind(#[from] UnknownInterestKind),

    /// The value parsed but falls outside the accepted range.
    #[error("{field} out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },
}

/// Raw submission exactly as received (form or JSON fields as text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentSubmission {
    pub amount: String,
    pub interest_rate: String,
    pub time_period: String,
    pub interest_type: String,
}

impl InvestmentSubmission {
    pub fn new(
        amount: impl Into<String>,
        interest_rate: impl Into<String>,
        time_period: impl Into<String>,
        interest_type: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            interest_rate: interest_rate.into(),
            time_period: time_period.into(),
            interest_type: interest_type.into(),
        }
    }

    /// Parse every field, then apply the range policy.
    ///
    /// Fields are checked in order: amount, interest_rate, time_period,
    /// interest_type. The first failure wins.
    pub fn parse(&self) -> Result<InvestmentTerms, InvestmentError> {
        let amount = parse_real("amount", &self.amount)?;
        let interest_rate = parse_real("interest_rate", &self.interest_rate)?;
        let time_period = parse_real("time_period", &self.time_period)?;
        let kind: InterestKind = self.interest_type.parse()?;

        InvestmentTerms::new(amount, interest_rate, time_period, kind)
    }
}

fn parse_real(field: &'static str, raw: &str) -> Result<f64, InvestmentError> {
    // `f64::from_str` accepts "inf" and "NaN"; neither is a usable amount.
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(InvestmentError::MalformedInput {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Validated terms: finite numbers within range and a known interest kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvestmentTerms {
    amount: f64,
    interest_rate: f64,
    time_period: f64,
    #[serde(rename = "interest_type")]
    kind: InterestKind,
}

impl InvestmentTerms {
    /// Range policy:
    /// - `amount > 0`
    /// - `interest_rate > -100` (the compounding base stays positive)
    /// - `time_period >= 0`
    pub fn new(
        amount: f64,
        interest_rate: f64,
        time_period: f64,
        kind: InterestKind,
    ) -> Result<Self, InvestmentError> {
        for (field, value) in [
            ("amount", amount),
            ("interest_rate", interest_rate),
            ("time_period", time_period),
        ] {
            if !value.is_finite() {
                return Err(InvestmentError::MalformedInput {
                    field,
                    value: value.to_string(),
                });
            }
        }

        if amount <= 0.0 {
            return Err(InvestmentError::OutOfRange {
                field: "amount",
                reason: "must be greater than zero",
            });
        }
        if interest_rate <= -100.0 {
            return Err(InvestmentError::OutOfRange {
                field: "interest_rate",
                reason: "must be greater than -100",
            });
        }
        if time_period < 0.0 {
            return Err(InvestmentError::OutOfRange {
                field: "time_period",
                reason: "must not be negative",
            });
        }

        Ok(Self {
            amount,
            interest_rate,
            time_period,
            kind,
        })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn time_period(&self) -> f64 {
        self.time_period
    }

    pub fn kind(&self) -> InterestKind {
        self.kind
    }

    pub fn compute(&self) -> accrue_interest::Computation {
        accrue_interest::compute(self.kind, self.amount, self.interest_rate, self.time_period)
    }

    /// Like [`compute`](Self::compute), but rejects results that overflow to a non-finite value.
    pub fn checked_compute(&self) -> Result<accrue_interest::Computation, InvestmentError> {
        let computed = self.compute();
        if !computed.interest.is_finite() || !computed.total.is_finite() {
            return Err(InvestmentError::OutOfRange {
                field: "time_period",
                reason: "interest overflows for these terms",
            });
        }
        Ok(computed)
    }
}
