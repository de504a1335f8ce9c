use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::error;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CredentialsRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.body_text()),
    };

    match services.accounts.register(&body.email, &body.password).await {
        Ok(user) => (StatusCode::CREATED, Json(dto::user_to_json(&user))).into_response(),
        Err(e) => errors::account_error_to_response(e),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CredentialsRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.body_text()),
    };

    let user = match services.accounts.authenticate(&body.email, &body.password).await {
        Ok(u) => u,
        Err(e) => return errors::account_error_to_response(e),
    };

    match services.jwt.issue(user.id, Utc::now()) {
        Ok(issued) => (StatusCode::OK, Json(dto::TokenResponse::from(issued))).into_response(),
        Err(e) => {
            error!(error = %e, "token signing failed");
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "token_error", "failed to issue token")
        }
    }
}
