//! `erpadmin-auth`: role-based access control for the ERP admin screens.
//!
//! Pure policy: a closed permission and role catalog, the role→permission
//! matrix, query functions over it, and declarative guards. No IO, no
//! persistence, no token handling; the role comes from the caller's session.

pub mod error;
pub mod evaluator;
pub mod guard;
pub mod matrix;
pub mod messages;
pub mod modules;
pub mod permissions;
pub mod registry;
pub mod roles;
pub mod session;

pub use error::{MatrixError, ParseError};
pub use evaluator::{
    accessible_modules, can_access, can_access_module, can_perform, can_perform_action,
    has_all_permissions, has_any_permission, has_permission, module_actions,
};
pub use guard::{AccessGuard, Denial, DenialReason, GuardOutcome, GuardSpec, Guarded};
pub use matrix::{PermissionSet, RoleMatrix};
pub use messages::{
    DenialMessages, DetailedMessages, FallbackMessage, GenericMessages, MessagePolicy, Severity,
};
pub use modules::{Action, Module};
pub use permissions::Permission;
pub use registry::{PermissionDefinition, RbacRegistry, RoleDefinition};
pub use roles::Role;
pub use session::{Session, SessionClaims, SessionUser, UserId};
