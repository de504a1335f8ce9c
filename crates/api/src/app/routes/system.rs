use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::OwnerContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    match services.accounts.get(owner.user_id()).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "user_id": user.id.to_string(),
                "email": user.email.as_str(),
            })),
        )
            .into_response(),
        // Token outlived its account (e.g. in-memory stores after a restart).
        Ok(None) => errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unknown user"),
        Err(e) => errors::account_error_to_response(e),
    }
}
