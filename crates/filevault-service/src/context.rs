//! Request context carrying the authenticated actor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filevault_auth::Principal;
use filevault_core::types::UserId;
use filevault_entity::user::{User, UserRole};

/// Context for the current authenticated request.
///
/// Built from the user returned by `UserService::authenticate` and passed
/// into every service method, so each operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The authenticated user's name.
    pub username: String,
    /// The user's role when the context was built.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for `user`.
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.name.clone(),
            role: user.role,
            request_time: Utc::now(),
        }
    }

    /// The identity file access decisions are made for.
    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.role)
    }
}
