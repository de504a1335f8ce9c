use axum::{Router, routing::get};

pub mod accounts;
pub mod investments;
pub mod system;

/// Router for all authenticated (owner-scoped) endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/investments", investments::router())
}
