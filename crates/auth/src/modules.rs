//! Business modules and the CRUD actions that can be checked against them.
//!
//! Module names arrive as plain strings from routes and menus and are matched
//! case-insensitively; action names must match exactly. Neither is trimmed,
//! and unknown names are `None`.
//!
//! The two string-keyed queries know the user module under different names:
//! module access answers to `users`, CRUD checks to `user`.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::permissions::Permission;

/// Coarse business-domain grouping; also the namespace of every permission.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    User,
    Company,
    Accounting,
    Inventory,
    Crm,
    Hr,
    Manufacturing,
    Procurement,
    Analytics,
    Reports,
    Settings,
}

impl Module {
    pub const ALL: [Module; 11] = [
        Module::User,
        Module::Company,
        Module::Accounting,
        Module::Inventory,
        Module::Crm,
        Module::Hr,
        Module::Manufacturing,
        Module::Procurement,
        Module::Analytics,
        Module::Reports,
        Module::Settings,
    ];

    /// Candidate list (and order) for the navigation menu.
    pub const NAVIGABLE: [Module; 8] = [
        Module::Accounting,
        Module::Inventory,
        Module::Crm,
        Module::Hr,
        Module::Manufacturing,
        Module::Procurement,
        Module::Analytics,
        Module::Reports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::User => "user",
            Module::Company => "company",
            Module::Accounting => "accounting",
            Module::Inventory => "inventory",
            Module::Crm => "crm",
            Module::Hr => "hr",
            Module::Manufacturing => "manufacturing",
            Module::Procurement => "procurement",
            Module::Analytics => "analytics",
            Module::Reports => "reports",
            Module::Settings => "settings",
        }
    }

    /// Case-insensitive lookup of the canonical module name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
    }

    /// Lookup used by module-access queries, where the user module is `users`.
    pub fn from_access_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("users") {
            return Some(Module::User);
        }
        Self::parse(name).filter(|m| *m != Module::User)
    }

    /// Lookup used by CRUD queries, where the user module is `user`.
    pub fn from_action_name(name: &str) -> Option<Self> {
        Self::parse(name)
    }

    /// Permissions of which at least one opens the module.
    ///
    /// Company has no entry: it is administered through settings screens and
    /// is never reachable as a module on its own.
    pub fn access_permissions(&self) -> &'static [Permission] {
        match self {
            Module::User => &[Permission::UserRead],
            Module::Company => &[],
            Module::Accounting => &[Permission::AccountingRead],
            Module::Inventory => &[Permission::InventoryRead],
            Module::Crm => &[Permission::CrmRead],
            Module::Hr => &[Permission::HrRead],
            Module::Manufacturing => &[Permission::ManufacturingRead],
            Module::Procurement => &[Permission::ProcurementRead],
            Module::Analytics => &[Permission::AnalyticsRead],
            Module::Reports => &[Permission::ReportsRead],
            Module::Settings => &[Permission::SettingsRead],
        }
    }

    /// The single permission guarding `action` in this module, if the module
    /// takes part in CRUD checks at all.
    pub fn action_permission(&self, action: Action) -> Option<Permission> {
        use Action::*;
        use Permission as P;

        let permission = match (self, action) {
            (Module::Accounting, Create) => P::AccountingCreate,
            (Module::Accounting, Read) => P::AccountingRead,
            (Module::Accounting, Update) => P::AccountingUpdate,
            (Module::Accounting, Delete) => P::AccountingDelete,

            (Module::Inventory, Create) => P::InventoryCreate,
            (Module::Inventory, Read) => P::InventoryRead,
            (Module::Inventory, Update) => P::InventoryUpdate,
            (Module::Inventory, Delete) => P::InventoryDelete,

            (Module::Crm, Create) => P::CrmCreate,
            (Module::Crm, Read) => P::CrmRead,
            (Module::Crm, Update) => P::CrmUpdate,
            (Module::Crm, Delete) => P::CrmDelete,

            (Module::Hr, Create) => P::HrCreate,
            (Module::Hr, Read) => P::HrRead,
            (Module::Hr, Update) => P::HrUpdate,
            (Module::Hr, Delete) => P::HrDelete,

            (Module::Manufacturing, Create) => P::ManufacturingCreate,
            (Module::Manufacturing, Read) => P::ManufacturingRead,
            (Module::Manufacturing, Update) => P::ManufacturingUpdate,
            (Module::Manufacturing, Delete) => P::ManufacturingDelete,

            (Module::Procurement, Create) => P::ProcurementCreate,
            (Module::Procurement, Read) => P::ProcurementRead,
            (Module::Procurement, Update) => P::ProcurementUpdate,
            (Module::Procurement, Delete) => P::ProcurementDelete,

            (Module::User, Create) => P::UserCreate,
            (Module::User, Read) => P::UserRead,
            (Module::User, Update) => P::UserUpdate,
            (Module::User, Delete) => P::UserDelete,

            (Module::Company | Module::Analytics | Module::Reports | Module::Settings, _) => {
                return None;
            }
        };

        Some(permission)
    }
}

impl core::fmt::Display for Module {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::UnknownModule(s.to_string()))
    }
}

/// Canonical CRUD verbs, in the order they are listed to callers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Exact lookup: `Delete` or ` delete` is not an action.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::UnknownAction(s.to_string()))
    }
}
