use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Role identifier used for RBAC.
///
/// Variants are declared from least to most privileged, so the derived `Ord`
/// is the privilege ordering (`Viewer < Employee < ... < SuperAdmin`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Viewer,
    Employee,
    Manager,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Every role, least privileged first.
    pub const ALL: [Role; 5] = [
        Role::Viewer,
        Role::Employee,
        Role::Manager,
        Role::Admin,
        Role::SuperAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Fail-closed lookup for role strings handed over by the authentication
    /// collaborator. Matching is exact.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == name)
    }

    /// Position in the privilege ordering, `0` for viewer.
    pub fn rank(&self) -> usize {
        *self as usize
    }

    /// The next more privileged role, if any.
    pub fn next_higher(&self) -> Option<Role> {
        Self::ALL.get(self.rank() + 1).copied()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Administrator",
            Role::Admin => "Administrator",
            Role::Manager => "Manager",
            Role::Employee => "Employee",
            Role::Viewer => "Viewer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Full system access with all permissions",
            Role::Admin => "Administrative access to manage users and all modules",
            Role::Manager => "Management access with approval and reporting capabilities",
            Role::Employee => "Standard access for daily operations",
            Role::Viewer => "Read-only access to view data and reports",
        }
    }

    /// Badge color used by role chips in the admin screens.
    pub fn color(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "#9C27B0",
            Role::Admin => "#F44336",
            Role::Manager => "#FF9800",
            Role::Employee => "#2196F3",
            Role::Viewer => "#4CAF50",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::UnknownRole(s.to_string()))
    }
}
