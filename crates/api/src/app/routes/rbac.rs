//! Policy inspection endpoints.
//!
//! `check`, `modules` and `guard` answer questions about the caller's own
//! session and are open to any caller (anonymous sessions are simply denied).
//! The registry endpoints expose the whole matrix and require `user:read`.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use erpadmin_auth::{GuardOutcome, GuardSpec, Permission};

use crate::app::{errors, AppState};
use crate::authz;
use crate::context::SessionContext;

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub permission: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/check", get(check_permission))
        .route("/modules/:module", get(module_access))
        .route("/guard", post(evaluate_guard))
        .route("/roles", get(list_roles))
        .route("/roles/:name", get(get_role))
        .route("/permissions", get(list_permissions))
        .route("/permissions/:name", get(get_permission))
}

/// GET /rbac/check?permission=X - Does the current session hold a permission?
pub async fn check_permission(
    Extension(ctx): Extension<SessionContext>,
    Query(query): Query<CheckQuery>,
) -> axum::response::Response {
    let Some(permission) = Permission::parse(&query.permission) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_permission",
            format!("unknown permission '{}'", query.permission),
        );
    };

    let granted = ctx.session().check_permission(permission);
    (
        StatusCode::OK,
        Json(json!({ "permission": permission, "granted": granted })),
    )
        .into_response()
}

/// GET /rbac/modules/:module - Module visibility and permitted actions.
///
/// Unknown modules are not an error: they are inaccessible with no actions.
pub async fn module_access(
    Extension(ctx): Extension<SessionContext>,
    Path(module): Path<String>,
) -> axum::response::Response {
    let session = ctx.session();
    (
        StatusCode::OK,
        Json(json!({
            "module": module,
            "accessible": session.can_access_module(&module),
            "actions": session.module_actions(&module),
        })),
    )
        .into_response()
}

/// POST /rbac/guard - Evaluate a guard spec against the current session.
pub async fn evaluate_guard(
    Extension(state): Extension<AppState>,
    Extension(ctx): Extension<SessionContext>,
    payload: Result<Json<GuardSpec>, JsonRejection>,
) -> axum::response::Response {
    let spec = match payload {
        Ok(Json(spec)) => spec,
        Err(rejection) => {
            return errors::json_error(rejection.status(), "invalid_guard", rejection.body_text());
        }
    };

    let body = match state.guard.check(&spec, ctx.session().role()) {
        GuardOutcome::Granted => json!({ "outcome": "granted" }),
        GuardOutcome::Denied(denial) => json!({
            "outcome": "denied",
            "message": state.guard.fallback_message(&denial),
        }),
    };

    (StatusCode::OK, Json(body)).into_response()
}

/// GET /rbac/roles - All roles with their granted permissions.
pub async fn list_roles(
    Extension(state): Extension<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> axum::response::Response {
    if let Err(e) = authz::require(ctx.session(), Permission::UserRead) {
        return errors::authz_error_to_response(e);
    }

    (StatusCode::OK, Json(json!({ "roles": state.registry.roles }))).into_response()
}

/// GET /rbac/roles/:name - One role.
pub async fn get_role(
    Extension(state): Extension<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Path(name): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authz::require(ctx.session(), Permission::UserRead) {
        return errors::authz_error_to_response(e);
    }

    match state.registry.role(&name) {
        Some(role) => (StatusCode::OK, Json(json!({ "role": role }))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "role not found"),
    }
}

/// GET /rbac/permissions - The full permission catalog.
pub async fn list_permissions(
    Extension(state): Extension<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> axum::response::Response {
    if let Err(e) = authz::require(ctx.session(), Permission::UserRead) {
        return errors::authz_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(json!({ "permissions": state.registry.permissions })),
    )
        .into_response()
}

/// GET /rbac/permissions/:name - One permission and the roles granting it.
pub async fn get_permission(
    Extension(state): Extension<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Path(name): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authz::require(ctx.session(), Permission::UserRead) {
        return errors::authz_error_to_response(e);
    }

    match state.registry.permission(&name) {
        Some(permission) => {
            (StatusCode::OK, Json(json!({ "permission": permission }))).into_response()
        }
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "permission not found"),
    }
}
