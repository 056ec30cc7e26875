//! Errors for the few fallible operations around the policy.
//!
//! Policy queries themselves never fail: they answer `false` or an empty list.

use thiserror::Error;

use crate::permissions::Permission;
use crate::roles::Role;

/// A name that is not part of one of the closed catalogs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    #[error("unknown permission '{0}'")]
    UnknownPermission(String),

    #[error("unknown module '{0}'")]
    UnknownModule(String),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("unknown denial message policy '{0}' (expected 'detailed' or 'generic')")]
    UnknownMessagePolicy(String),
}

/// A structural problem found by [`crate::RoleMatrix::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("role '{0}' has no permissions")]
    EmptyRole(Role),

    #[error("super_admin is missing '{0}' from the catalog")]
    SuperAdminIncomplete(Permission),

    #[error("'{permission}' is granted to {lower} but not to the more privileged {higher}")]
    NotMonotonic {
        lower: Role,
        higher: Role,
        permission: Permission,
    },
}
