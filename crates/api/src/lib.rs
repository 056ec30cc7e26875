//! HTTP API: read-only inspection of the RBAC policy for UI and route collaborators.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
