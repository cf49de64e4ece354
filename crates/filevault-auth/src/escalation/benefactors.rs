//! The set of users who have changed a given user's role.

use std::collections::HashSet;

use filevault_core::types::UserId;
use filevault_entity::history::ChangeRoleHistory;

/// Everyone who has ever appeared as the actor of a history record whose
/// target is a particular user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorBenefactors {
    subject: Option<UserId>,
    actors: HashSet<UserId>,
}

impl PriorBenefactors {
    /// Builds the set for `subject` from ledger records.
    ///
    /// Records targeting somebody else are ignored, so callers may pass an
    /// unfiltered slice.
    pub fn from_history(subject: UserId, records: &[ChangeRoleHistory]) -> Self {
        let actors = records
            .iter()
            .filter(|r| r.target_id == subject)
            .map(|r| r.actor_id)
            .collect();
        Self {
            subject: Some(subject),
            actors,
        }
    }

    /// Whether `user_id` has previously changed the subject.
    pub fn contains(&self, user_id: UserId) -> bool {
        self.actors.contains(&user_id)
    }

    /// The user this set was computed for.
    pub fn subject(&self) -> Option<UserId> {
        self.subject
    }

    /// Number of distinct benefactors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether nobody has changed the subject yet.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}
