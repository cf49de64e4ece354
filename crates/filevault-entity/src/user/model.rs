//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use filevault_core::types::UserId;

use super::role::UserRole;

/// A registered vault user.
///
/// Permissions are never granted to a user directly; they always come from
/// the current `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub name: String,
    /// Current role, replaced wholesale on change.
    pub role: UserRole,
    /// Whether the account is blocked.
    pub is_blocked: bool,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the role or blocked flag last changed.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new, unblocked user with the given role.
    pub fn new(name: impl Into<String>, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name: name.into(),
            role,
            is_blocked: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The caller-facing projection of a user after a role/block change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    /// Login name.
    pub name: String,
    /// Role after the request.
    pub role: UserRole,
    /// Blocked flag after the request.
    pub is_blocked: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            role: user.role,
            is_blocked: user.is_blocked,
        }
    }
}
