//! RBAC enforcement: turns a missing permission into an error.

use filevault_core::error::AppError;
use filevault_entity::permission::Permission;
use filevault_entity::user::UserRole;

use super::policies;

/// Enforces role-based permissions for user-management style operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    /// Creates a new enforcer over the static policy table.
    pub fn new() -> Self {
        Self
    }

    /// Returns `Ok(())` if `role` grants `permission`, `AccessDenied` otherwise.
    pub fn require_permission(&self, role: UserRole, permission: Permission) -> Result<(), AppError> {
        if policies::has_permission(role, permission) {
            Ok(())
        } else {
            Err(AppError::access_denied(format!(
                "Role '{role}' does not have permission '{permission}'"
            )))
        }
    }
}
