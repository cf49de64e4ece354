//! Change-history ledger entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use filevault_core::types::{HistoryId, UserId};

use crate::user::UserRole;

/// An immutable record stating that `actor_id` assigned `new_role` to
/// `target_id` at `changed_at`.
///
/// Records are only ever appended. They feed the escalation guard and are
/// never consulted for file access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChangeRoleHistory {
    /// Unique record identifier.
    pub id: HistoryId,
    /// The user who made the change.
    pub actor_id: UserId,
    /// The user whose role was changed.
    pub target_id: UserId,
    /// The role assigned by this change.
    pub new_role: UserRole,
    /// When the change was made.
    pub changed_at: DateTime<Utc>,
}

impl ChangeRoleHistory {
    /// Build a record stamped with the current time.
    pub fn record(actor_id: UserId, target_id: UserId, new_role: UserRole) -> Self {
        Self {
            id: HistoryId::new(),
            actor_id,
            target_id,
            new_role,
            changed_at: Utc::now(),
        }
    }
}
