//! Declarative access guards.
//!
//! A [`GuardSpec`] describes what a unit of UI requires; [`AccessGuard`]
//! evaluates it against a role and decides what to mount. Guards hold no
//! state between checks and never mutate anything.
//!
//! Requirements are evaluated in a fixed order and the first failure wins:
//!
//! 1. exact role
//! 2. module access
//! 3. module + action
//! 4. single permission
//! 5. permission set (all or any, per `require_all`)
//!
//! A session without a role is denied before any of these run.

use serde::{Deserialize, Serialize};

use crate::evaluator;
use crate::messages::{DenialMessages, DetailedMessages, FallbackMessage};
use crate::modules::Action;
use crate::permissions::Permission;
use crate::roles::Role;

/// One access requirement, possibly combining several kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardSpec {
    /// Exact role match; a more privileged role does not satisfy it.
    pub role: Option<Role>,
    /// Module name as it arrives from routes or menus (case-insensitive).
    pub module: Option<String>,
    /// Only checked together with `module`.
    pub action: Option<Action>,
    pub permission: Option<Permission>,
    /// Skipped entirely when empty.
    pub permissions: Vec<Permission>,
    pub require_all: bool,
    /// When `false`, a denial renders nothing instead of a fallback.
    pub show_fallback: bool,
}

impl Default for GuardSpec {
    fn default() -> Self {
        Self {
            role: None,
            module: None,
            action: None,
            permission: None,
            permissions: Vec::new(),
            require_all: false,
            show_fallback: true,
        }
    }
}

impl GuardSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn permission(mut self, permission: Permission) -> Self {
        self.permission = Some(permission);
        self
    }

    pub fn any_of(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions = permissions.into_iter().collect();
        self.require_all = false;
        self
    }

    pub fn all_of(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions = permissions.into_iter().collect();
        self.require_all = true;
        self
    }

    pub fn hide_fallback(mut self) -> Self {
        self.show_fallback = false;
        self
    }

    // Shorthands used across the admin screens.

    pub fn admin_only() -> Self {
        Self::new().role(Role::Admin)
    }

    pub fn manager_only() -> Self {
        Self::new().any_of([Permission::UserManageRoles])
    }

    pub fn create_permission(module: impl Into<String>) -> Self {
        Self::new().module(module).action(Action::Create)
    }

    pub fn update_permission(module: impl Into<String>) -> Self {
        Self::new().module(module).action(Action::Update)
    }

    pub fn delete_permission(module: impl Into<String>) -> Self {
        Self::new().module(module).action(Action::Delete)
    }

    pub fn reports_permission() -> Self {
        Self::new().permission(Permission::ReportsRead)
    }

    pub fn settings_permission() -> Self {
        Self::new().permission(Permission::SettingsRead)
    }

    /// Evaluate the requirements against `role`; the first failing check decides.
    pub fn evaluate(&self, role: impl Into<Option<Role>>) -> GuardOutcome {
        match self.first_failure(role.into()) {
            None => GuardOutcome::Granted,
            Some(reason) => {
                tracing::debug!(reason = ?reason, "guard denied");
                GuardOutcome::Denied(Denial {
                    reason,
                    show_fallback: self.show_fallback,
                })
            }
        }
    }

    fn first_failure(&self, role: Option<Role>) -> Option<DenialReason> {
        let Some(role) = role else {
            return Some(DenialReason::Unauthenticated);
        };

        if let Some(required) = self.role {
            if role != required {
                return Some(DenialReason::RoleMismatch { required });
            }
        }

        if let Some(module) = &self.module {
            if !evaluator::can_access_module(role, module) {
                return Some(DenialReason::ModuleAccess {
                    module: module.clone(),
                });
            }

            if let Some(action) = self.action {
                if !evaluator::can_perform_action(role, module, action.as_str()) {
                    return Some(DenialReason::ModuleAction {
                        module: module.clone(),
                        action,
                    });
                }
            }
        }

        if let Some(permission) = self.permission {
            if !evaluator::has_permission(role, permission) {
                return Some(DenialReason::MissingPermission { permission });
            }
        }

        if !self.permissions.is_empty() {
            let granted = if self.require_all {
                evaluator::has_all_permissions(role, &self.permissions)
            } else {
                evaluator::has_any_permission(role, &self.permissions)
            };

            if !granted {
                return Some(DenialReason::MissingPermissions {
                    permissions: self.permissions.clone(),
                    require_all: self.require_all,
                });
            }
        }

        None
    }
}

/// Which requirement failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenialReason {
    Unauthenticated,
    RoleMismatch { required: Role },
    ModuleAccess { module: String },
    ModuleAction { module: String, action: Action },
    MissingPermission { permission: Permission },
    MissingPermissions { permissions: Vec<Permission>, require_all: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Denial {
    pub reason: DenialReason,
    pub show_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Granted,
    Denied(Denial),
}

impl GuardOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, GuardOutcome::Granted)
    }
}

/// What to mount after a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// The protected content.
    Content(T),
    /// The caller-provided fallback.
    Fallback(T),
    /// The default message for the denial.
    Message(FallbackMessage),
    /// Nothing at all (`show_fallback == false`).
    Hidden,
}

impl<T> Guarded<T> {
    pub fn into_content(self) -> Option<T> {
        match self {
            Guarded::Content(content) => Some(content),
            _ => None,
        }
    }
}

/// Evaluates guard specs and picks what to render.
#[derive(Debug, Clone, Default)]
pub struct AccessGuard<M = DetailedMessages> {
    messages: M,
}

impl AccessGuard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: DenialMessages> AccessGuard<M> {
    pub fn with_messages(messages: M) -> Self {
        Self { messages }
    }

    pub fn check(&self, spec: &GuardSpec, role: impl Into<Option<Role>>) -> GuardOutcome {
        spec.evaluate(role)
    }

    /// Default message for a denial, `None` when the denial is silent.
    pub fn fallback_message(&self, denial: &Denial) -> Option<FallbackMessage> {
        denial
            .show_fallback
            .then(|| self.messages.message(&denial.reason))
    }

    /// Build `content` only when access is granted; otherwise return the
    /// caller's fallback, the default message, or nothing.
    pub fn render<T>(
        &self,
        spec: &GuardSpec,
        role: impl Into<Option<Role>>,
        content: impl FnOnce() -> T,
        fallback: Option<T>,
    ) -> Guarded<T> {
        match spec.evaluate(role) {
            GuardOutcome::Granted => Guarded::Content(content()),
            GuardOutcome::Denied(denial) if !denial.show_fallback => Guarded::Hidden,
            GuardOutcome::Denied(denial) => match fallback {
                Some(fallback) => Guarded::Fallback(fallback),
                None => Guarded::Message(self.messages.message(&denial.reason)),
            },
        }
    }
}
