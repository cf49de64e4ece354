//! The file access predicate.
//!
//! Access is granted when any of the following holds, checked in order:
//! 1. the caller allows public files and the file is public,
//! 2. the actor's role grants one of the required permissions,
//! 3. the actor owns the file.

use serde::{Deserialize, Serialize};

use filevault_core::error::AppError;
use filevault_core::types::UserId;
use filevault_entity::file::FileMetadata;
use filevault_entity::permission::Permission;
use filevault_entity::user::{User, UserRole};

use crate::rbac::policies;

/// The identity an access decision is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The acting user.
    pub user_id: UserId,
    /// The acting user's current role.
    pub role: UserRole,
}

impl Principal {
    /// Creates a principal.
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}

/// Which rule granted access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessGrant {
    /// The file is public and the operation allows public access.
    Public,
    /// The actor's role carries a required permission.
    Role,
    /// The actor owns the file.
    Owner,
    /// No rule matched.
    Denied,
}

impl AccessGrant {
    /// Whether access was granted.
    pub fn is_granted(&self) -> bool {
        !matches!(self, Self::Denied)
    }
}

/// Evaluates the access rules and reports which one matched.
pub fn decide(
    actor: Principal,
    file: &FileMetadata,
    required: &[Permission],
    allow_if_public: bool,
) -> AccessGrant {
    if allow_if_public && file.is_public {
        AccessGrant::Public
    } else if policies::has_any_permission(actor.role, required) {
        AccessGrant::Role
    } else if file.is_owned_by(actor.user_id) {
        AccessGrant::Owner
    } else {
        AccessGrant::Denied
    }
}

/// Returns whether `actor` may access `file`.
pub fn can_access(
    actor: Principal,
    file: &FileMetadata,
    required: &[Permission],
    allow_if_public: bool,
) -> bool {
    decide(actor, file, required, allow_if_public).is_granted()
}

/// Like [`can_access`] but fails with `AccessDenied` when no rule matches.
pub fn require_access(
    actor: Principal,
    file: &FileMetadata,
    required: &[Permission],
    allow_if_public: bool,
) -> Result<AccessGrant, AppError> {
    match decide(actor, file, required, allow_if_public) {
        AccessGrant::Denied => {
            tracing::debug!(
                actor = %actor.user_id,
                role = %actor.role,
                file_id = %file.id,
                "File access denied"
            );
            Err(AppError::access_denied("Can't get access to this file"))
        }
        grant => Ok(grant),
    }
}
