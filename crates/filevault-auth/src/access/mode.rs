//! Standard access modes used by the file operations.

use filevault_entity::permission::Permission;
use filevault_entity::user::UserRole;

use crate::rbac::policies;

/// The permission set and public-file allowance an operation asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessMode {
    /// Any one of these permissions grants access.
    pub required: &'static [Permission],
    /// Whether a public file is accessible regardless of permissions.
    pub allow_if_public: bool,
}

impl AccessMode {
    /// Reading metadata or content.
    pub const READ: Self = Self {
        required: &[Permission::FileRead],
        allow_if_public: true,
    };

    /// Renaming, commenting, or toggling visibility.
    pub const UPDATE: Self = Self {
        required: &[Permission::ChangeFileVisibility],
        allow_if_public: false,
    };

    /// Deleting the file.
    pub const DELETE: Self = Self {
        required: &[Permission::DeletePublicFile],
        allow_if_public: false,
    };

    /// Whether `role` alone satisfies this mode, independent of any file.
    pub fn granted_by_role(&self, role: UserRole) -> bool {
        policies::has_any_permission(role, self.required)
    }
}
