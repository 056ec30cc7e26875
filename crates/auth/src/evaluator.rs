//! Policy evaluation over the standard role matrix.
//!
//! - No IO
//! - No panics
//! - No errors: unknown roles, modules and actions evaluate to `false` / empty
//!
//! Every query takes `impl Into<Option<Role>>` so that "no role" (an
//! anonymous or unresolved session) is a first-class, always-denied input.

use crate::matrix::RoleMatrix;
use crate::modules::{Action, Module};
use crate::permissions::Permission;
use crate::roles::Role;

/// `true` iff the role's matrix entry contains `permission`.
pub fn has_permission(role: impl Into<Option<Role>>, permission: Permission) -> bool {
    let Some(role) = role.into() else {
        tracing::trace!(permission = %permission, "no role; denied");
        return false;
    };

    let granted = RoleMatrix::standard().grants(role, permission);
    tracing::trace!(role = %role, permission = %permission, granted, "permission check");
    granted
}

/// `true` iff at least one of `permissions` is held. An empty list is `false`.
pub fn has_any_permission(role: impl Into<Option<Role>>, permissions: &[Permission]) -> bool {
    let role = role.into();
    permissions.iter().any(|p| has_permission(role, *p))
}

/// `true` iff every one of `permissions` is held.
///
/// An empty list is vacuously `true` for any role. Without a role the answer
/// is `false` regardless of the list.
pub fn has_all_permissions(role: impl Into<Option<Role>>, permissions: &[Permission]) -> bool {
    let Some(role) = role.into() else {
        return false;
    };
    permissions.iter().all(|p| has_permission(role, *p))
}

/// Typed module access: any of the module's access permissions.
pub fn can_access(role: impl Into<Option<Role>>, module: Module) -> bool {
    has_any_permission(role, module.access_permissions())
}

/// Typed CRUD check; modules outside the CRUD table are always `false`.
pub fn can_perform(role: impl Into<Option<Role>>, module: Module, action: Action) -> bool {
    match module.action_permission(action) {
        Some(permission) => has_permission(role, permission),
        None => false,
    }
}

/// Module access by (case-insensitive) name, e.g. from a route parameter.
/// The user module is named `users` here.
pub fn can_access_module(role: impl Into<Option<Role>>, module: &str) -> bool {
    match Module::from_access_name(module) {
        Some(module) => can_access(role, module),
        None => {
            tracing::debug!(module, "unknown module; denied");
            false
        }
    }
}

/// CRUD check by case-insensitive module name and exact action name.
/// The user module is named `user` here.
pub fn can_perform_action(role: impl Into<Option<Role>>, module: &str, action: &str) -> bool {
    let (Some(module), Some(action)) = (Module::from_action_name(module), Action::parse(action))
    else {
        tracing::debug!(module, action, "unknown module or action; denied");
        return false;
    };
    can_perform(role, module, action)
}

/// Navigable modules the role may open, in menu order.
pub fn accessible_modules(role: impl Into<Option<Role>>) -> Vec<&'static str> {
    let role = role.into();
    Module::NAVIGABLE
        .into_iter()
        .filter(|m| can_access(role, *m))
        .map(|m| m.as_str())
        .collect()
}

/// CRUD actions the role may perform in `module`, in `create, read, update, delete` order.
pub fn module_actions(role: impl Into<Option<Role>>, module: &str) -> Vec<&'static str> {
    let role = role.into();
    let Some(module) = Module::from_action_name(module) else {
        return Vec::new();
    };
    Action::ALL
        .into_iter()
        .filter(|a| can_perform(role, module, *a))
        .map(|a| a.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use Permission::*;

    const NO_ROLE: Option<Role> = None;

    #[test]
    fn manager_cannot_delete_accounting_records() {
        assert!(!has_permission(Role::Manager, AccountingDelete));
    }

    #[test]
    fn manager_can_update_accounting_records() {
        assert!(has_permission(Role::Manager, AccountingUpdate));
    }

    #[test]
    fn employee_can_open_hr() {
        assert!(can_access_module(Role::Employee, "hr"));
    }

    #[test]
    fn employee_cannot_update_hr() {
        assert!(!can_perform_action(Role::Employee, "hr", "update"));
    }

    #[test]
    fn viewer_sees_every_navigable_module() {
        assert_eq!(
            accessible_modules(Role::Viewer),
            vec![
                "accounting",
                "inventory",
                "crm",
                "hr",
                "manufacturing",
                "procurement",
                "analytics",
                "reports",
            ]
        );
    }

    #[test]
    fn admin_has_full_crud_on_crm() {
        assert_eq!(
            module_actions(Role::Admin, "crm"),
            vec!["create", "read", "update", "delete"]
        );
    }

    #[test]
    fn missing_role_is_denied_everything() {
        for permission in Permission::ALL {
            assert!(!has_permission(NO_ROLE, *permission));
        }
        assert!(!has_any_permission(NO_ROLE, &[UserRead]));
        assert!(!has_all_permissions(NO_ROLE, &[]));
        assert!(!can_access_module(NO_ROLE, "accounting"));
        assert!(!can_perform_action(NO_ROLE, "crm", "read"));
        assert!(accessible_modules(NO_ROLE).is_empty());
        assert!(module_actions(NO_ROLE, "crm").is_empty());
    }

    #[test]
    fn unknown_module_and_action_fail_closed() {
        for role in Role::ALL {
            assert!(!can_access_module(role, "no-such-module"));
            assert!(!can_perform_action(role, "crm", "archive"));
            assert!(!can_perform_action(role, "no-such-module", "read"));
            assert!(module_actions(role, "no-such-module").is_empty());
        }
    }

    #[test]
    fn module_names_are_case_insensitive() {
        assert!(can_access_module(Role::Viewer, "CRM"));
        assert!(can_perform_action(Role::Admin, "Inventory", "delete"));
        assert!(can_access_module(Role::Viewer, "users"));
    }

    #[test]
    fn names_are_matched_as_given() {
        assert!(!can_perform_action(Role::Admin, "crm", "Delete"));
        assert!(!can_access_module(Role::Viewer, " crm "));
        assert!(!can_perform_action(Role::Admin, " crm", "delete"));
        assert!(module_actions(Role::Admin, "crm ").is_empty());
    }

    #[test]
    fn user_module_is_users_for_access_and_user_for_actions() {
        assert!(!can_access_module(Role::Viewer, "user"));
        assert!(can_access_module(Role::Viewer, "users"));

        assert!(module_actions(Role::Admin, "users").is_empty());
        assert!(!can_perform_action(Role::Admin, "users", "delete"));
        assert_eq!(
            module_actions(Role::Admin, "user"),
            vec!["create", "read", "update", "delete"]
        );
    }

    #[test]
    fn company_is_never_an_accessible_module() {
        assert!(!can_access_module(Role::SuperAdmin, "company"));
        assert!(module_actions(Role::SuperAdmin, "company").is_empty());
    }

    #[test]
    fn modules_outside_the_crud_table_have_no_actions() {
        // reports:create exists, but reports is not a CRUD module.
        assert!(has_permission(Role::Manager, ReportsCreate));
        assert!(!can_perform_action(Role::Manager, "reports", "create"));
        assert!(module_actions(Role::SuperAdmin, "analytics").is_empty());
        assert!(can_access_module(Role::Viewer, "settings"));
        assert!(module_actions(Role::SuperAdmin, "settings").is_empty());
    }

    #[test]
    fn settings_is_accessible_but_not_in_navigation() {
        assert!(can_access_module(Role::Viewer, "settings"));
        assert!(!accessible_modules(Role::SuperAdmin).contains(&"settings"));
    }

    #[test]
    fn vacuous_truth_and_empty_any() {
        for role in Role::ALL {
            assert!(has_all_permissions(role, &[]));
            assert!(!has_any_permission(role, &[]));
        }
    }

    #[test]
    fn employee_actions_per_module() {
        assert_eq!(module_actions(Role::Employee, "inventory"), vec!["create", "read", "update"]);
        assert_eq!(module_actions(Role::Employee, "accounting"), vec!["create", "read"]);
        assert_eq!(module_actions(Role::Employee, "user"), vec!["read"]);
        assert_eq!(module_actions(Role::Viewer, "procurement"), vec!["read"]);
    }

    fn any_role() -> impl Strategy<Value = Role> {
        prop::sample::select(Role::ALL.to_vec())
    }

    fn any_permissions() -> impl Strategy<Value = Vec<Permission>> {
        prop::collection::vec(prop::sample::select(Permission::ALL.to_vec()), 0..12)
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: anything a role holds is also held by every more privileged role.
        #[test]
        fn grants_are_inherited_upward(role in any_role(), permissions in any_permissions()) {
            for higher in Role::ALL.into_iter().filter(|r| *r > role) {
                for permission in &permissions {
                    if has_permission(role, *permission) {
                        prop_assert!(has_permission(higher, *permission));
                    }
                }
                if has_all_permissions(role, &permissions) {
                    prop_assert!(has_all_permissions(higher, &permissions));
                }
            }
        }

        /// Property: any/all agree with element-wise checks.
        #[test]
        fn any_and_all_match_elementwise(role in any_role(), permissions in any_permissions()) {
            let held: Vec<bool> = permissions.iter().map(|p| has_permission(role, *p)).collect();
            prop_assert_eq!(has_any_permission(role, &permissions), held.iter().any(|h| *h));
            prop_assert_eq!(has_all_permissions(role, &permissions), held.iter().all(|h| *h));
        }

        /// Property: repeated queries with identical inputs agree.
        #[test]
        fn queries_are_idempotent(role in any_role(), module in "[a-zA-Z_-]{0,14}", action in "[a-z]{0,8}") {
            prop_assert_eq!(can_access_module(role, &module), can_access_module(role, &module));
            prop_assert_eq!(
                can_perform_action(role, &module, &action),
                can_perform_action(role, &module, &action)
            );
            prop_assert_eq!(module_actions(role, &module), module_actions(role, &module));
            prop_assert_eq!(accessible_modules(role), accessible_modules(role));
        }

        /// Property: super_admin holds every permission.
        #[test]
        fn super_admin_holds_everything(permissions in any_permissions()) {
            prop_assert!(has_all_permissions(Role::SuperAdmin, &permissions));
        }
    }
}
