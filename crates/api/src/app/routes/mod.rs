use axum::{routing::get, Router};

pub mod rbac;
pub mod system;

/// Router for all session-aware endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/session", get(system::session))
        .nest("/rbac", rbac::router())
}
