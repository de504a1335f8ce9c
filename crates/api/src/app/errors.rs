use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::error;

use accrue_infra::{AccountError, LedgerError};
use accrue_investments::InvestmentError;

pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    match err {
        LedgerError::Invalid(e) => investment_error_to_response(e),
        LedgerError::Store(e) => {
            error!(error = %e, "investment store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn investment_error_to_response(err: InvestmentError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        InvestmentError::MalformedInput { .. } => {
            json_error(StatusCode::BAD_REQUEST, "malformed_input", message)
        }
        InvestmentError::UnrecognizedKind(_) => {
            json_error(StatusCode::BAD_REQUEST, "unrecognized_interest_kind", message)
        }
        InvestmentError::OutOfRange { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "out_of_range", message)
        }
    }
}

pub fn account_error_to_response(err: AccountError) -> axum::response::Response {
    match err {
        AccountError::Validation(e) => json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
        AccountError::EmailTaken => json_error(StatusCode::CONFLICT, "email_taken", err.to_string()),
        AccountError::InvalidCredentials => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", err.to_string())
        }
        AccountError::Credential(e) => {
            error!(error = %e, "credential failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "credential_error", "credential processing failed")
        }
        AccountError::Store(e) => {
            error!(error = %e, "user store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
