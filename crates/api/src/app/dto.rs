use serde::{Deserialize, Serialize};

use accrue_auth::{IssuedToken, User};
use accrue_investments::{Investment, InvestmentSubmission};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// A numeric field that may arrive as a JSON number or as text.
///
/// Both forms are handed to the ledger as text so they share one parser.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrText {
    pub fn into_text(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InvestmentRequest {
    pub amount: NumberOrText,
    pub interest_rate: NumberOrText,
    pub time_period: NumberOrText,
    pub interest_type: String,
}

impl From<InvestmentRequest> for InvestmentSubmission {
    fn from(req: InvestmentRequest) -> Self {
        InvestmentSubmission::new(
            req.amount.into_text(),
            req.interest_rate.into_text(),
            req.time_period.into_text(),
            req.interest_type,
        )
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            token_type: "Bearer",
            expires_at: issued.expires_at,
        }
    }
}

pub fn user_to_json(user: &User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id.to_string(),
        "email": user.email.as_str(),
        "created_at": user.created_at,
    })
}

pub fn investments_to_json(items: Vec<Investment>) -> serde_json::Value {
    serde_json::json!({ "items": items })
}
