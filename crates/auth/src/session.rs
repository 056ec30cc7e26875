//! Session context handed to the policy by the caller.
//!
//! The authentication collaborator produces [`SessionClaims`]; the caller turns
//! them into a [`Session`] and passes it explicitly wherever a decision is
//! needed. Nothing here reads ambient or global state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evaluator;
use crate::matrix::{PermissionSet, RoleMatrix};
use crate::modules::{Action, Module};
use crate::permissions::Permission;
use crate::roles::Role;

/// Identity of an authenticated user, as issued by the authentication service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Authentication result as delivered by the login flow.
///
/// `role` stays a raw string: it is resolved fail-closed when the session is
/// built. `permissions` is carried for display only and never consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: UserId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub company: Option<String>,
    /// Set by the demo login; demo sessions run against mock data.
    #[serde(default)]
    pub demo: bool,
}

/// Who the session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub user_id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub company: Option<String>,
    pub claimed_permissions: Vec<String>,
}

/// An explicit, immutable session. All queries are answered by the evaluator;
/// a session without a role is denied everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<SessionUser>,
    role: Option<Role>,
    demo: bool,
}

impl Session {
    /// No user, no role.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session carrying only a role (demo logins, tests, server-side checks).
    pub fn for_role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    /// Resolve claims into a session. An unrecognized role string yields a
    /// session with no role.
    pub fn from_claims(claims: SessionClaims) -> Self {
        let role = Role::parse(&claims.role);
        if role.is_none() {
            tracing::warn!(
                user_id = %claims.user_id,
                role = %claims.role,
                "unrecognized role in session claims; session has no access"
            );
        }

        Self {
            user: Some(SessionUser {
                user_id: claims.user_id,
                email: claims.email,
                name: claims.name,
                company: claims.company,
                claimed_permissions: claims.permissions,
            }),
            role,
            demo: claims.demo,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() || self.role.is_some()
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    /// Effective permissions from the matrix; empty without a role.
    pub fn permissions(&self) -> PermissionSet {
        self.role
            .map(|role| *RoleMatrix::standard().permissions(role))
            .unwrap_or_default()
    }

    pub fn check_permission(&self, permission: Permission) -> bool {
        evaluator::has_permission(self.role, permission)
    }

    pub fn check_any_permission(&self, permissions: &[Permission]) -> bool {
        evaluator::has_any_permission(self.role, permissions)
    }

    pub fn check_all_permissions(&self, permissions: &[Permission]) -> bool {
        evaluator::has_all_permissions(self.role, permissions)
    }

    pub fn can_access_module(&self, module: &str) -> bool {
        evaluator::can_access_module(self.role, module)
    }

    pub fn can_perform_action(&self, module: &str, action: &str) -> bool {
        evaluator::can_perform_action(self.role, module, action)
    }

    pub fn can(&self, module: Module, action: Action) -> bool {
        evaluator::can_perform(self.role, module, action)
    }

    pub fn accessible_modules(&self) -> Vec<&'static str> {
        evaluator::accessible_modules(self.role)
    }

    pub fn module_actions(&self, module: &str) -> Vec<&'static str> {
        evaluator::module_actions(self.role, module)
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Some(Role::SuperAdmin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Some(Role::Admin | Role::SuperAdmin))
    }

    pub fn is_manager(&self) -> bool {
        self.role == Some(Role::Manager) || self.is_admin()
    }

    pub fn can_manage_users(&self) -> bool {
        self.check_permission(Permission::UserManageRoles)
    }

    pub fn can_access_settings(&self) -> bool {
        self.check_permission(Permission::SettingsRead)
    }

    pub fn can_modify_settings(&self) -> bool {
        self.check_permission(Permission::SettingsUpdate)
    }

    pub fn can_access_system_settings(&self) -> bool {
        self.check_permission(Permission::SettingsSystem)
    }

    pub fn can_view_reports(&self) -> bool {
        self.check_permission(Permission::ReportsRead)
    }

    pub fn can_create_reports(&self) -> bool {
        self.check_permission(Permission::ReportsCreate)
    }

    pub fn can_export_reports(&self) -> bool {
        self.check_permission(Permission::ReportsExport)
    }

    pub fn can_view_analytics(&self) -> bool {
        self.check_permission(Permission::AnalyticsRead)
    }

    pub fn can_view_advanced_analytics(&self) -> bool {
        self.check_permission(Permission::AnalyticsAdvanced)
    }
}
