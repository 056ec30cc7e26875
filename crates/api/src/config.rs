//! Environment-driven configuration for the API binary.
//!
//! Invalid values are logged and replaced by defaults; the service always starts.

use std::net::SocketAddr;

use axum::http::HeaderName;
use erpadmin_auth::MessagePolicy;

pub const BIND_ENV: &str = "ERPADMIN_BIND";
pub const ROLE_HEADER_ENV: &str = "ERPADMIN_ROLE_HEADER";
pub const SESSION_HEADER_ENV: &str = "ERPADMIN_SESSION_HEADER";
pub const DENIAL_MESSAGES_ENV: &str = "ERPADMIN_DENIAL_MESSAGES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    /// Header carrying a bare role name, set by the upstream authentication proxy.
    pub role_header: HeaderName,
    /// Header carrying JSON session claims; takes precedence over `role_header`.
    pub session_header: HeaderName,
    pub denial_messages: MessagePolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            role_header: HeaderName::from_static("x-erp-role"),
            session_header: HeaderName::from_static("x-erp-session"),
            denial_messages: MessagePolicy::Detailed,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind: parse_or(lookup(BIND_ENV), BIND_ENV, defaults.bind, |v| v.parse().ok()),
            role_header: parse_or(lookup(ROLE_HEADER_ENV), ROLE_HEADER_ENV, defaults.role_header, |v| {
                HeaderName::from_bytes(v.as_bytes()).ok()
            }),
            session_header: parse_or(
                lookup(SESSION_HEADER_ENV),
                SESSION_HEADER_ENV,
                defaults.session_header,
                |v| HeaderName::from_bytes(v.as_bytes()).ok(),
            ),
            denial_messages: parse_or(
                lookup(DENIAL_MESSAGES_ENV),
                DENIAL_MESSAGES_ENV,
                defaults.denial_messages,
                |v| v.parse().ok(),
            ),
        }
    }
}

fn parse_or<T: core::fmt::Debug>(
    raw: Option<String>,
    key: &str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> T {
    let Some(raw) = raw else {
        return default;
    };

    match parse(raw.trim()) {
        Some(value) => value,
        None => {
            tracing::warn!(key, value = %raw, default = ?default, "invalid configuration value; using default");
            default
        }
    }
}
