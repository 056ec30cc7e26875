use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use erpadmin_auth::{Role, SessionUser};

use crate::context::SessionContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize)]
struct ModuleView {
    module: &'static str,
    actions: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct SessionView {
    authenticated: bool,
    demo: bool,
    role: Option<Role>,
    display_name: Option<&'static str>,
    user: Option<SessionUser>,
    modules: Vec<ModuleView>,
}

/// GET /session - What the current session may see, for building navigation.
pub async fn session(Extension(ctx): Extension<SessionContext>) -> impl IntoResponse {
    let session = ctx.session();

    let modules = session
        .accessible_modules()
        .into_iter()
        .map(|module| ModuleView {
            module,
            actions: session.module_actions(module),
        })
        .collect();

    Json(SessionView {
        authenticated: session.is_authenticated(),
        demo: session.is_demo(),
        role: session.role(),
        display_name: session.role().map(|role| role.display_name()),
        user: session.user().cloned(),
        modules,
    })
}
