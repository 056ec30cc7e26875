//! API-side permission checks for the inspection endpoints.

use thiserror::Error;

use erpadmin_auth::{Permission, Session};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(Permission),
}

/// Require `permission` from the request's session.
///
/// - No IO
/// - No panics
pub fn require(session: &Session, permission: Permission) -> Result<(), AuthzError> {
    if session.role().is_none() {
        return Err(AuthzError::Unauthenticated);
    }

    if session.check_permission(permission) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erpadmin_auth::Role;

    #[test]
    fn anonymous_is_unauthenticated() {
        assert_eq!(
            require(&Session::anonymous(), Permission::UserRead),
            Err(AuthzError::Unauthenticated)
        );
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let err = require(&Session::for_role(Role::Viewer), Permission::UserManageRoles).unwrap_err();
        assert_eq!(err, AuthzError::Forbidden(Permission::UserManageRoles));
        assert_eq!(err.to_string(), "forbidden: missing permission 'user:manage_roles'");
    }

    #[test]
    fn held_permission_passes() {
        assert_eq!(require(&Session::for_role(Role::Viewer), Permission::UserRead), Ok(()));
    }
}
