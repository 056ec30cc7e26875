use axum::{
    extract::State,
    http::{HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};

use erpadmin_auth::{Role, Session, SessionClaims};

use crate::context::SessionContext;

#[derive(Debug, Clone)]
pub struct SessionState {
    pub role_header: HeaderName,
    pub session_header: HeaderName,
}

/// Attach a [`SessionContext`] to every request.
///
/// Credentials are trusted as-is: the upstream proxy has already authenticated
/// the caller. Missing or unreadable credentials produce an anonymous session
/// rather than an error, so downstream checks fail closed.
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let session = session_from_headers(&state, req.headers());
    tracing::debug!(
        path = %req.uri().path(),
        role = ?session.role(),
        "session resolved"
    );

    req.extensions_mut().insert(SessionContext::new(session));
    next.run(req).await
}

pub fn session_from_headers(state: &SessionState, headers: &HeaderMap) -> Session {
    if let Some(value) = headers.get(&state.session_header) {
        let claims = value
            .to_str()
            .ok()
            .and_then(|raw| serde_json::from_str::<SessionClaims>(raw).ok());

        return match claims {
            Some(claims) => Session::from_claims(claims),
            None => {
                tracing::warn!("malformed session header; treating request as anonymous");
                Session::anonymous()
            }
        };
    }

    let Some(value) = headers.get(&state.role_header) else {
        return Session::anonymous();
    };

    match value.to_str().ok().and_then(|raw| Role::parse(raw.trim())) {
        Some(role) => Session::for_role(role),
        None => {
            tracing::warn!(header = %state.role_header, "unrecognized role header; treating request as anonymous");
            Session::anonymous()
        }
    }
}
