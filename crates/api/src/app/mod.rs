//! HTTP API application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use erpadmin_auth::{AccessGuard, MessagePolicy, RbacRegistry};

use crate::config::ApiConfig;
use crate::middleware;

pub mod errors;
pub mod routes;

/// Read-only policy objects shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub guard: Arc<AccessGuard<MessagePolicy>>,
    pub registry: Arc<RbacRegistry>,
}

impl AppState {
    pub fn new(messages: MessagePolicy) -> Self {
        Self {
            guard: Arc::new(AccessGuard::with_messages(messages)),
            registry: Arc::new(RbacRegistry::standard()),
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> Router {
    let session_state = middleware::SessionState {
        role_header: config.role_header.clone(),
        session_header: config.session_header.clone(),
    };

    // Session-aware routes: every request gets a (possibly anonymous) session.
    let inspected = routes::router().layer(
        ServiceBuilder::new()
            .layer(Extension(AppState::new(config.denial_messages)))
            .layer(axum::middleware::from_fn_with_state(
                session_state,
                middleware::session_middleware,
            )),
    );

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(inspected)
}
