//! Audit view of the RBAC policy: every role and permission with display
//! metadata, derived from the matrix.

use serde::Serialize;

use crate::matrix::RoleMatrix;
use crate::modules::Module;
use crate::permissions::Permission;
use crate::roles::Role;

/// Role definition with its granted permissions (for audit/display).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDefinition {
    pub name: Role,
    pub display_name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    /// Position in the privilege ordering, `0` for viewer.
    pub rank: usize,
    pub permissions: Vec<Permission>,
}

/// Permission definition (for audit/display).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionDefinition {
    pub name: Permission,
    pub module: Module,
    pub verb: &'static str,
    pub description: String,
    pub granted_to: Vec<Role>,
}

/// Registry of all roles and permissions, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct RbacRegistry {
    pub roles: Vec<RoleDefinition>,
    pub permissions: Vec<PermissionDefinition>,
}

impl RbacRegistry {
    pub fn standard() -> Self {
        Self::from_matrix(RoleMatrix::standard())
    }

    pub fn from_matrix(matrix: &RoleMatrix) -> Self {
        let roles = Role::ALL
            .into_iter()
            .map(|role| RoleDefinition {
                name: role,
                display_name: role.display_name(),
                description: role.description(),
                color: role.color(),
                rank: role.rank(),
                permissions: matrix.permissions(role).to_vec(),
            })
            .collect();

        let permissions = Permission::ALL
            .iter()
            .map(|permission| PermissionDefinition {
                name: *permission,
                module: permission.module(),
                verb: permission.verb(),
                description: permission_description(*permission),
                granted_to: matrix.roles_granting(*permission),
            })
            .collect();

        Self { roles, permissions }
    }

    pub fn role(&self, name: &str) -> Option<&RoleDefinition> {
        let role = Role::parse(name)?;
        self.roles.iter().find(|r| r.name == role)
    }

    pub fn permission(&self, name: &str) -> Option<&PermissionDefinition> {
        let permission = Permission::parse(name)?;
        self.permissions.iter().find(|p| p.name == permission)
    }
}

fn permission_description(permission: Permission) -> String {
    let module = permission.module().as_str();
    match permission.verb() {
        "create" => format!("Create new {module} records"),
        "read" => format!("View {module} records"),
        "update" => format!("Edit existing {module} records"),
        "delete" => format!("Delete {module} records"),
        "reports" => format!("Run {module} reports"),
        "approve" => format!("Approve {module} transactions"),
        "adjust" => "Post stock adjustments".to_string(),
        "payroll" => "Run and review payroll".to_string(),
        "manage_roles" => "Assign roles to users".to_string(),
        "manage_pipeline" => "Configure the sales pipeline".to_string(),
        "control" => "Control production runs".to_string(),
        "advanced" => "Use advanced analytics".to_string(),
        "export" => "Export reports".to_string(),
        "settings" => "Manage company settings".to_string(),
        "system" => "Change system-wide settings".to_string(),
        "security" => "Change security settings".to_string(),
        other => format!("{other} {module}"),
    }
}
