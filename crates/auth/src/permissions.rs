use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;
use crate::modules::Module;

macro_rules! permission_catalog {
    ($($variant:ident => $module:ident, $name:literal;)+) => {
        /// Permission identifier.
        ///
        /// The catalog is closed: every capability in the system is one of
        /// these variants, and each maps to exactly one `module:verb` token.
        /// Permissions are never scoped to an instance.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Permission {
            $($variant,)+
        }

        impl Permission {
            /// The whole catalog, grouped by module.
            pub const ALL: &'static [Permission] = &[$(Permission::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Permission::$variant => $name,)+
                }
            }

            pub fn module(&self) -> Module {
                match self {
                    $(Permission::$variant => Module::$module,)+
                }
            }
        }
    };
}

permission_catalog! {
    UserCreate => User, "user:create";
    UserRead => User, "user:read";
    UserUpdate => User, "user:update";
    UserDelete => User, "user:delete";
    UserManageRoles => User, "user:manage_roles";

    CompanyCreate => Company, "company:create";
    CompanyRead => Company, "company:read";
    CompanyUpdate => Company, "company:update";
    CompanyDelete => Company, "company:delete";
    CompanySettings => Company, "company:settings";

    AccountingRead => Accounting, "accounting:read";
    AccountingCreate => Accounting, "accounting:create";
    AccountingUpdate => Accounting, "accounting:update";
    AccountingDelete => Accounting, "accounting:delete";
    AccountingReports => Accounting, "accounting:reports";
    AccountingApprove => Accounting, "accounting:approve";

    InventoryRead => Inventory, "inventory:read";
    InventoryCreate => Inventory, "inventory:create";
    InventoryUpdate => Inventory, "inventory:update";
    InventoryDelete => Inventory, "inventory:delete";
    InventoryReports => Inventory, "inventory:reports";
    InventoryAdjust => Inventory, "inventory:adjust";

    CrmRead => Crm, "crm:read";
    CrmCreate => Crm, "crm:create";
    CrmUpdate => Crm, "crm:update";
    CrmDelete => Crm, "crm:delete";
    CrmReports => Crm, "crm:reports";
    CrmManagePipeline => Crm, "crm:manage_pipeline";

    HrRead => Hr, "hr:read";
    HrCreate => Hr, "hr:create";
    HrUpdate => Hr, "hr:update";
    HrDelete => Hr, "hr:delete";
    HrReports => Hr, "hr:reports";
    HrPayroll => Hr, "hr:payroll";

    ManufacturingRead => Manufacturing, "manufacturing:read";
    ManufacturingCreate => Manufacturing, "manufacturing:create";
    ManufacturingUpdate => Manufacturing, "manufacturing:update";
    ManufacturingDelete => Manufacturing, "manufacturing:delete";
    ManufacturingReports => Manufacturing, "manufacturing:reports";
    ManufacturingControl => Manufacturing, "manufacturing:control";

    ProcurementRead => Procurement, "procurement:read";
    ProcurementCreate => Procurement, "procurement:create";
    ProcurementUpdate => Procurement, "procurement:update";
    ProcurementDelete => Procurement, "procurement:delete";
    ProcurementReports => Procurement, "procurement:reports";
    ProcurementApprove => Procurement, "procurement:approve";

    AnalyticsRead => Analytics, "analytics:read";
    AnalyticsAdvanced => Analytics, "analytics:advanced";
    ReportsRead => Reports, "reports:read";
    ReportsCreate => Reports, "reports:create";
    ReportsExport => Reports, "reports:export";

    SettingsRead => Settings, "settings:read";
    SettingsUpdate => Settings, "settings:update";
    SettingsSystem => Settings, "settings:system";
    SettingsSecurity => Settings, "settings:security";
}

impl Permission {
    /// Everything after the `module:` prefix.
    pub fn verb(&self) -> &'static str {
        let name = self.as_str();
        match name.split_once(':') {
            Some((_, verb)) => verb,
            None => name,
        }
    }

    /// Exact-match lookup of a wire token; `None` for anything outside the catalog.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == name)
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::UnknownPermission(s.to_string()))
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_tokens_are_unique_and_namespaced() {
        let mut seen = HashSet::new();
        for permission in Permission::ALL {
            let name = permission.as_str();
            assert!(seen.insert(name), "duplicate token {name}");

            let (module, verb) = name.split_once(':').expect("token must be module:verb");
            assert_eq!(module, permission.module().as_str());
            assert_eq!(verb, permission.verb());
        }
        assert_eq!(seen.len(), 55);
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!(Permission::parse("crm:read"), Some(Permission::CrmRead));
        assert_eq!(Permission::parse("CRM:READ"), None);
        assert_eq!(Permission::parse("crm:archive"), None);
        assert!(matches!(
            "crm:archive".parse::<Permission>(),
            Err(ParseError::UnknownPermission(_))
        ));
    }

    #[test]
    fn serializes_as_wire_token() {
        let json = serde_json::to_string(&Permission::HrPayroll).unwrap();
        assert_eq!(json, "\"hr:payroll\"");

        let back: Permission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Permission::HrPayroll);

        let err = serde_json::from_str::<Permission>("\"hr:bonus\"").unwrap_err();
        assert!(err.to_string().contains("hr:bonus"));
    }
}
