use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use accrue_auth::JwtValidator;

use crate::app::errors::{account_error_to_response, json_error};
use crate::app::services::SharedAccounts;
use crate::context::OwnerContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
    pub accounts: SharedAccounts,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers()).ok_or_else(|| {
        json_error(StatusCode::UNAUTHORIZED, "unauthorized", "missing bearer token")
    })?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|e| {
        debug!(error = %e, "rejected bearer token");
        json_error(StatusCode::UNAUTHORIZED, "unauthorized", e.to_string())
    })?;

    // The subject must still be a registered user.
    match state.accounts.get(claims.sub).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            debug!(user_id = %claims.sub, "token subject is not a registered user");
            return Err(json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unknown user"));
        }
        Err(e) => return Err(account_error_to_response(e)),
    }

    req.extensions_mut().insert(OwnerContext::new(claims.sub));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }
    Some(token)
}
