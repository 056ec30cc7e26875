//! The role→permission matrix: the single source of truth for who can do what.
//!
//! Built once per process and read-only afterwards. `super_admin` is derived
//! from the full catalog; every other role is listed by hand and checked by
//! [`RoleMatrix::validate`].

use std::sync::LazyLock;

use serde::{Serialize, Serializer};

use crate::error::MatrixError;
use crate::permissions::Permission::{self, *};
use crate::roles::Role;

/// Immutable set of permissions, one bit per catalog entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct PermissionSet(u64);

const _: () = assert!(Permission::ALL.len() <= 64);

impl PermissionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The whole catalog.
    pub fn all() -> Self {
        Self::from_slice(Permission::ALL)
    }

    pub fn from_slice(permissions: &[Permission]) -> Self {
        permissions.iter().copied().collect()
    }

    fn bit(permission: Permission) -> u64 {
        1u64 << (permission as u32)
    }

    pub fn with(self, permission: Permission) -> Self {
        Self(self.0 | Self::bit(permission))
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0 & Self::bit(permission) != 0
    }

    pub fn is_subset(&self, other: &PermissionSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::ALL.iter().copied().filter(|p| self.contains(*p))
    }

    /// Members of `self` that `other` lacks, in catalog order.
    pub fn difference<'a>(&'a self, other: &'a PermissionSet) -> impl Iterator<Item = Permission> + 'a {
        self.iter().filter(|p| !other.contains(*p))
    }

    pub fn to_vec(&self) -> Vec<Permission> {
        self.iter().collect()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

const ADMIN_GRANTS: &[Permission] = &[
    // User management (role management included)
    UserCreate,
    UserRead,
    UserUpdate,
    UserDelete,
    UserManageRoles,
    // Company: no create/delete
    CompanyRead,
    CompanyUpdate,
    CompanySettings,
    AccountingRead,
    AccountingCreate,
    AccountingUpdate,
    AccountingDelete,
    AccountingReports,
    AccountingApprove,
    InventoryRead,
    InventoryCreate,
    InventoryUpdate,
    InventoryDelete,
    InventoryReports,
    InventoryAdjust,
    CrmRead,
    CrmCreate,
    CrmUpdate,
    CrmDelete,
    CrmReports,
    CrmManagePipeline,
    HrRead,
    HrCreate,
    HrUpdate,
    HrDelete,
    HrReports,
    HrPayroll,
    ManufacturingRead,
    ManufacturingCreate,
    ManufacturingUpdate,
    ManufacturingDelete,
    ManufacturingReports,
    ManufacturingControl,
    ProcurementRead,
    ProcurementCreate,
    ProcurementUpdate,
    ProcurementDelete,
    ProcurementReports,
    ProcurementApprove,
    AnalyticsRead,
    AnalyticsAdvanced,
    ReportsRead,
    ReportsCreate,
    ReportsExport,
    // Settings: everything but system
    SettingsRead,
    SettingsUpdate,
    SettingsSecurity,
];

const MANAGER_GRANTS: &[Permission] = &[
    UserRead,
    UserUpdate,
    CompanyRead,
    // No deletes on business data
    AccountingRead,
    AccountingCreate,
    AccountingUpdate,
    AccountingReports,
    InventoryRead,
    InventoryCreate,
    InventoryUpdate,
    InventoryReports,
    InventoryAdjust,
    CrmRead,
    CrmCreate,
    CrmUpdate,
    CrmReports,
    CrmManagePipeline,
    HrRead,
    HrCreate,
    HrUpdate,
    HrReports,
    ManufacturingRead,
    ManufacturingCreate,
    ManufacturingUpdate,
    ManufacturingReports,
    ProcurementRead,
    ProcurementCreate,
    ProcurementUpdate,
    ProcurementReports,
    AnalyticsRead,
    ReportsRead,
    ReportsCreate,
    ReportsExport,
    SettingsRead,
];

const EMPLOYEE_GRANTS: &[Permission] = &[
    UserRead,
    CompanyRead,
    AccountingRead,
    AccountingCreate,
    InventoryRead,
    InventoryCreate,
    InventoryUpdate,
    CrmRead,
    CrmCreate,
    CrmUpdate,
    HrRead,
    ManufacturingRead,
    ManufacturingCreate,
    ProcurementRead,
    ProcurementCreate,
    AnalyticsRead,
    ReportsRead,
    SettingsRead,
];

const VIEWER_GRANTS: &[Permission] = &[
    UserRead,
    CompanyRead,
    AccountingRead,
    InventoryRead,
    CrmRead,
    HrRead,
    ManufacturingRead,
    ProcurementRead,
    AnalyticsRead,
    ReportsRead,
    SettingsRead,
];

static STANDARD: LazyLock<RoleMatrix> = LazyLock::new(RoleMatrix::build);

/// Total mapping from every role to its exact permission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMatrix {
    grants: [PermissionSet; 5],
}

impl RoleMatrix {
    /// The process-wide matrix.
    pub fn standard() -> &'static RoleMatrix {
        &STANDARD
    }

    fn build() -> Self {
        let matrix = Self::from_grants(|role| match role {
            Role::SuperAdmin => PermissionSet::all(),
            Role::Admin => PermissionSet::from_slice(ADMIN_GRANTS),
            Role::Manager => PermissionSet::from_slice(MANAGER_GRANTS),
            Role::Employee => PermissionSet::from_slice(EMPLOYEE_GRANTS),
            Role::Viewer => PermissionSet::from_slice(VIEWER_GRANTS),
        });

        tracing::debug!(
            roles = Role::ALL.len(),
            permissions = Permission::ALL.len(),
            "role matrix initialized"
        );
        matrix
    }

    pub(crate) fn from_grants(grants: impl Fn(Role) -> PermissionSet) -> Self {
        Self {
            grants: Role::ALL.map(grants),
        }
    }

    pub fn permissions(&self, role: Role) -> &PermissionSet {
        &self.grants[role.rank()]
    }

    pub fn grants(&self, role: Role, permission: Permission) -> bool {
        self.permissions(role).contains(permission)
    }

    /// Roles holding `permission`, least privileged first.
    pub fn roles_granting(&self, permission: Permission) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.grants(*role, permission))
            .collect()
    }

    /// Check the structural rules of the matrix and report every violation.
    ///
    /// - super_admin holds the full catalog;
    /// - no role is empty;
    /// - each role's set is a subset of the next more privileged role's set.
    pub fn validate(&self) -> Result<(), Vec<MatrixError>> {
        let mut errors = Vec::new();

        let full = PermissionSet::all();
        errors.extend(
            full.difference(self.permissions(Role::SuperAdmin))
                .map(MatrixError::SuperAdminIncomplete),
        );

        for role in Role::ALL {
            if self.permissions(role).is_empty() {
                errors.push(MatrixError::EmptyRole(role));
            }

            if let Some(higher) = role.next_higher() {
                errors.extend(
                    self.permissions(role)
                        .difference(self.permissions(higher))
                        .map(|permission| MatrixError::NotMonotonic {
                            lower: role,
                            higher,
                            permission,
                        }),
                );
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_non_empty_set() {
        let matrix = RoleMatrix::standard();
        for role in Role::ALL {
            assert!(!matrix.permissions(role).is_empty(), "{role} is empty");
        }
    }

    #[test]
    fn super_admin_is_the_full_catalog() {
        let matrix = RoleMatrix::standard();
        assert_eq!(*matrix.permissions(Role::SuperAdmin), PermissionSet::all());
        assert_eq!(matrix.permissions(Role::SuperAdmin).len(), Permission::ALL.len());
    }

    #[test]
    fn roles_are_monotonic_along_the_privilege_ladder() {
        let matrix = RoleMatrix::standard();
        for pair in Role::ALL.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            let missing: Vec<_> = matrix
                .permissions(lower)
                .difference(matrix.permissions(higher))
                .collect();
            assert!(missing.is_empty(), "{lower} ⊄ {higher}: {missing:?}");
        }
    }

    #[test]
    fn standard_matrix_validates() {
        assert_eq!(RoleMatrix::standard().validate(), Ok(()));
    }

    #[test]
    fn table_sizes_match_the_policy() {
        let matrix = RoleMatrix::standard();
        assert_eq!(matrix.permissions(Role::Viewer).len(), 11);
        assert_eq!(matrix.permissions(Role::Employee).len(), 18);
        assert_eq!(matrix.permissions(Role::Manager).len(), 34);
        assert_eq!(matrix.permissions(Role::Admin).len(), 52);
    }

    #[test]
    fn admin_lacks_only_system_level_grants() {
        let matrix = RoleMatrix::standard();
        let missing: Vec<_> = PermissionSet::all()
            .difference(matrix.permissions(Role::Admin))
            .collect();
        assert_eq!(missing, vec![CompanyCreate, CompanyDelete, SettingsSystem]);
    }

    #[test]
    fn validate_reports_a_non_monotonic_edit() {
        // Simulate a careless edit: viewer gains hr:payroll, which employee lacks.
        let broken = RoleMatrix::from_grants(|role| {
            let base = *RoleMatrix::standard().permissions(role);
            if role == Role::Viewer { base.with(HrPayroll) } else { base }
        });

        let errors = broken.validate().unwrap_err();
        assert!(errors.contains(&MatrixError::NotMonotonic {
            lower: Role::Viewer,
            higher: Role::Employee,
            permission: HrPayroll,
        }));
    }

    #[test]
    fn validate_reports_an_incomplete_super_admin() {
        let broken = RoleMatrix::from_grants(|role| {
            if role == Role::SuperAdmin {
                PermissionSet::from_slice(ADMIN_GRANTS)
            } else {
                *RoleMatrix::standard().permissions(role)
            }
        });

        let errors = broken.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                MatrixError::SuperAdminIncomplete(CompanyCreate),
                MatrixError::SuperAdminIncomplete(CompanyDelete),
                MatrixError::SuperAdminIncomplete(SettingsSystem),
            ]
        );
    }

    #[test]
    fn roles_granting_lists_in_privilege_order() {
        let matrix = RoleMatrix::standard();
        assert_eq!(
            matrix.roles_granting(AccountingDelete),
            vec![Role::Admin, Role::SuperAdmin]
        );
        assert_eq!(matrix.roles_granting(SettingsSystem), vec![Role::SuperAdmin]);
        assert_eq!(matrix.roles_granting(UserRead), Role::ALL.to_vec());
    }

    #[test]
    fn every_permission_has_its_own_bit() {
        let mut seen = PermissionSet::empty();
        for permission in Permission::ALL {
            assert!(!seen.contains(*permission), "{permission} shares a bit");
            seen = seen.with(*permission);
        }
        assert_eq!(seen.len(), Permission::ALL.len());
    }

    #[test]
    fn set_operations() {
        let set = PermissionSet::from_slice(&[CrmRead, CrmRead, HrRead]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(HrRead));
        assert!(!set.contains(HrUpdate));
        assert!(PermissionSet::empty().is_subset(&set));
        assert!(set.is_subset(&PermissionSet::all()));
        assert_eq!(set.to_vec(), vec![CrmRead, HrRead]);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["crm:read","hr:read"]"#);
    }
}
