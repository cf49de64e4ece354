//! Permission enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A capability token. The set is closed; roles bind to it statically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Permission {
    /// Read any file, including private files owned by other users.
    #[serde(rename = "file:read")]
    FileRead,
    /// Upload files.
    #[serde(rename = "file:write")]
    FileWrite,
    /// Rename, re-comment or toggle visibility of files owned by others.
    #[serde(rename = "file:change_visibility")]
    ChangeFileVisibility,
    /// Delete files owned by others.
    #[serde(rename = "file:delete_public")]
    DeletePublicFile,
    /// Assign a new role to another user.
    #[serde(rename = "user:change_role")]
    ChangeRole,
    /// Block or unblock another user.
    #[serde(rename = "user:block")]
    BlockUser,
}

impl Permission {
    /// Return the wire name of the permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileRead => "file:read",
            Self::FileWrite => "file:write",
            Self::ChangeFileVisibility => "file:change_visibility",
            Self::DeletePublicFile => "file:delete_public",
            Self::ChangeRole => "user:change_role",
            Self::BlockUser => "user:block",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
