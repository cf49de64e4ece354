//! Role-to-permission mapping.
//!
//! The table is compiled in and cannot change at runtime.

use filevault_entity::permission::Permission;
use filevault_entity::user::UserRole;

const USER: &[Permission] = &[Permission::FileWrite];

const MODERATOR: &[Permission] = &[
    Permission::FileRead,
    Permission::FileWrite,
    Permission::ChangeFileVisibility,
    Permission::DeletePublicFile,
    Permission::BlockUser,
];

const ADMIN: &[Permission] = &[
    Permission::FileRead,
    Permission::FileWrite,
    Permission::ChangeFileVisibility,
    Permission::DeletePublicFile,
    Permission::ChangeRole,
    Permission::BlockUser,
];

/// Returns the permissions granted to `role`.
pub fn permissions_of(role: UserRole) -> &'static [Permission] {
    match role {
        UserRole::User => USER,
        UserRole::Moderator => MODERATOR,
        UserRole::Admin => ADMIN,
    }
}

/// Checks whether `role` grants `permission`.
pub fn has_permission(role: UserRole, permission: Permission) -> bool {
    permissions_of(role).contains(&permission)
}

/// Checks whether `role` grants at least one of `required`.
///
/// An empty `required` slice never matches.
pub fn has_any_permission(role: UserRole, required: &[Permission]) -> bool {
    required.iter().any(|p| has_permission(role, *p))
}
