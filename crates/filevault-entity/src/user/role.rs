//! User role enumeration and the stored role row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use filevault_core::AppError;
use filevault_core::types::RoleId;

/// The closed set of roles a user can hold.
///
/// The permissions bound to each role live in `filevault_auth::rbac`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Regular account: reads and writes its own files.
    User,
    /// Moderates public content and can block users.
    Moderator,
    /// Full administrator.
    Admin,
}

impl UserRole {
    /// Every role, in ascending order of privilege.
    pub const ALL: [UserRole; 3] = [Self::User, Self::Moderator, Self::Admin];

    /// Return the role as its canonical uppercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Moderator => "MODERATOR",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    /// Parses a role name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "MODERATOR" => Ok(Self::Moderator),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(AppError::invalid_role(format!(
                "Invalid role: '{s}'. Expected one of: USER, MODERATOR, ADMIN"
            ))),
        }
    }
}

/// A role as persisted in the `roles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Row identifier.
    pub id: RoleId,
    /// The role this row stands for.
    pub name: UserRole,
    /// When the row was seeded.
    pub created_at: DateTime<Utc>,
}

impl Role {
    /// Build a fresh role row for seeding.
    pub fn seed(name: UserRole) -> Self {
        Self {
            id: RoleId::new(),
            name,
            created_at: Utc::now(),
        }
    }
}
