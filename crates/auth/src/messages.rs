//! Default fallback messages shown when a guard denies access.
//!
//! Message wording is a presentation policy kept apart from evaluation, so a
//! deployment can switch from the detailed messages (which name the missing
//! role or permission) to a generic one without touching the evaluator.

use core::str::FromStr;

use serde::Serialize;

use crate::error::ParseError;
use crate::guard::DenialReason;

/// Visual weight of a fallback message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Restricted,
}

/// The informational view rendered in place of protected content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackMessage {
    pub severity: Severity,
    pub title: String,
    pub body: String,
}

impl FallbackMessage {
    pub fn new(severity: Severity, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Turns a denial into the message shown to the denied viewer.
pub trait DenialMessages: Send + Sync {
    fn message(&self, reason: &DenialReason) -> FallbackMessage;
}

/// Names exactly what was required. Helps legitimate users request access,
/// but reveals the shape of the policy to whoever is looking.
#[derive(Debug, Copy, Clone, Default)]
pub struct DetailedMessages;

impl DenialMessages for DetailedMessages {
    fn message(&self, reason: &DenialReason) -> FallbackMessage {
        match reason {
            DenialReason::Unauthenticated => FallbackMessage::new(
                Severity::Restricted,
                "Sign in required",
                "You need to sign in to view this content.",
            ),
            DenialReason::RoleMismatch { required } => FallbackMessage::new(
                Severity::Restricted,
                "Access Restricted",
                format!("This feature requires {required} role"),
            ),
            DenialReason::ModuleAccess { module } => FallbackMessage::new(
                Severity::Warning,
                "Module Unavailable",
                format!("You don't have permission to access the {module} module."),
            ),
            DenialReason::ModuleAction { module, action } => FallbackMessage::new(
                Severity::Info,
                "Action Not Permitted",
                format!("You don't have permission to {action} in the {module} module."),
            ),
            DenialReason::MissingPermission { permission } => FallbackMessage::new(
                Severity::Restricted,
                "Permission Required",
                permission.as_str(),
            ),
            DenialReason::MissingPermissions {
                permissions,
                require_all,
            } => {
                let quantifier = if *require_all { "All" } else { "Any" };
                let list = permissions
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                FallbackMessage::new(
                    Severity::Restricted,
                    "Multiple Permissions Required",
                    format!("{quantifier} of: {list}"),
                )
            }
        }
    }
}

/// One message for every denial; discloses nothing about the policy.
#[derive(Debug, Copy, Clone, Default)]
pub struct GenericMessages;

impl DenialMessages for GenericMessages {
    fn message(&self, _reason: &DenialReason) -> FallbackMessage {
        FallbackMessage::new(
            Severity::Restricted,
            "Access Restricted",
            "You don't have permission to view this content.",
        )
    }
}

/// Message policy selected by configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MessagePolicy {
    #[default]
    Detailed,
    Generic,
}

impl DenialMessages for MessagePolicy {
    fn message(&self, reason: &DenialReason) -> FallbackMessage {
        match self {
            MessagePolicy::Detailed => DetailedMessages.message(reason),
            MessagePolicy::Generic => GenericMessages.message(reason),
        }
    }
}

impl FromStr for MessagePolicy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detailed" => Ok(MessagePolicy::Detailed),
            "generic" => Ok(MessagePolicy::Generic),
            _ => Err(ParseError::UnknownMessagePolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, Permission, Role};

    fn reasons() -> Vec<DenialReason> {
        vec![
            DenialReason::Unauthenticated,
            DenialReason::RoleMismatch { required: Role::Admin },
            DenialReason::ModuleAccess { module: "hr".to_string() },
            DenialReason::ModuleAction {
                module: "crm".to_string(),
                action: Action::Delete,
            },
            DenialReason::MissingPermission {
                permission: Permission::ReportsExport,
            },
            DenialReason::MissingPermissions {
                permissions: vec![Permission::HrPayroll, Permission::SettingsSystem],
                require_all: true,
            },
        ]
    }

    #[test]
    fn detailed_messages_name_the_requirement() {
        let m = DetailedMessages;
        assert_eq!(
            m.message(&DenialReason::RoleMismatch { required: Role::Admin }).body,
            "This feature requires admin role"
        );
        assert_eq!(
            m.message(&DenialReason::ModuleAction {
                module: "crm".to_string(),
                action: Action::Delete
            })
            .body,
            "You don't have permission to delete in the crm module."
        );
        assert_eq!(
            m.message(&DenialReason::ModuleAccess { module: "hr".to_string() }).severity,
            Severity::Warning
        );

        let any = m.message(&DenialReason::MissingPermissions {
            permissions: vec![Permission::CrmRead, Permission::HrRead],
            require_all: false,
        });
        assert_eq!(any.title, "Multiple Permissions Required");
        assert_eq!(any.body, "Any of: crm:read, hr:read");
    }

    #[test]
    fn generic_messages_disclose_nothing() {
        for reason in reasons() {
            let message = GenericMessages.message(&reason);
            assert_eq!(message.title, "Access Restricted");
            for role in Role::ALL {
                assert!(!message.body.contains(role.as_str()));
            }
            assert!(!message.body.contains(':'));
        }
    }

    #[test]
    fn policy_parses_from_config_values() {
        assert_eq!("detailed".parse::<MessagePolicy>(), Ok(MessagePolicy::Detailed));
        assert_eq!(" Generic ".parse::<MessagePolicy>(), Ok(MessagePolicy::Generic));
        assert!("verbose".parse::<MessagePolicy>().is_err());
        assert_eq!(MessagePolicy::default(), MessagePolicy::Detailed);
    }

    #[test]
    fn policy_delegates() {
        let reason = DenialReason::MissingPermission {
            permission: Permission::HrPayroll,
        };
        assert_eq!(MessagePolicy::Detailed.message(&reason).body, "hr:payroll");
        assert_eq!(
            MessagePolicy::Generic.message(&reason),
            GenericMessages.message(&reason)
        );
    }
}
