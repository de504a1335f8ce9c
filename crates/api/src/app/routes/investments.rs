use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use accrue_investments::InvestmentSubmission;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::OwnerContext;

pub fn router() -> Router {
    Router::new().route("/", get(list_investments).post(record_investment))
}

fn submission_from(
    body: Result<Json<dto::InvestmentRequest>, JsonRejection>,
) -> Result<InvestmentSubmission, axum::response::Response> {
    match body {
        Ok(Json(req)) => Ok(req.into()),
        Err(e) => Err(errors::json_error(StatusCode::BAD_REQUEST, "malformed_input", e.body_text())),
    }
}

pub async fn record_investment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    body: Result<Json<dto::InvestmentRequest>, JsonRejection>,
) -> axum::response::Response {
    let submission = match submission_from(body) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match services.ledger.record(owner.user_id(), &submission).await {
        Ok(investment) => (StatusCode::CREATED, Json(investment)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn list_investments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    match services.ledger.list(owner.user_id()).await {
        Ok(items) => (StatusCode::OK, Json(dto::investments_to_json(items))).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

/// Compute interest for the submitted terms without recording them.
pub async fn quote(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::InvestmentRequest>, JsonRejection>,
) -> axum::response::Response {
    let submission = match submission_from(body) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match services.ledger.quote(&submission) {
        Ok(quote) => (StatusCode::OK, Json(quote)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
