//! Decides which parts of a role/block change request may be applied.

use serde::{Deserialize, Serialize};

use filevault_entity::permission::Permission;
use filevault_entity::user::User;

use super::benefactors::PriorBenefactors;
use crate::rbac::policies;

/// A combined request to change a user's role and/or blocked flag.
///
/// The role is kept as the name the caller supplied. It is parsed only once
/// the guard allows the role change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    /// Name of the role to assign, if any.
    pub new_role: Option<String>,
    /// Blocked flag to set, if any.
    pub blocked: Option<bool>,
}

/// What happened to one field of a [`ChangeRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOutcome {
    /// The request did not touch this field.
    NotRequested,
    /// The change may be applied.
    Allowed,
    /// The actor's role lacks the permission for this field.
    MissingPermission,
    /// The target previously changed the actor's role.
    PriorBenefactor,
}

/// The guard's verdict for a single request.
///
/// A denied field is not an error: the request partially succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationDecision {
    /// Outcome for the role field.
    pub role: FieldOutcome,
    /// Outcome for the blocked field.
    pub blocked: FieldOutcome,
    request: ChangeRequest,
}

impl EscalationDecision {
    /// The role name to assign, when the role change is allowed.
    pub fn role_to_apply(&self) -> Option<&str> {
        match self.role {
            FieldOutcome::Allowed => self.request.new_role.as_deref(),
            _ => None,
        }
    }

    /// The blocked flag to set, when the block change is allowed.
    pub fn blocked_to_apply(&self) -> Option<bool> {
        match self.blocked {
            FieldOutcome::Allowed => self.request.blocked,
            _ => None,
        }
    }

    /// Whether nothing will be written.
    pub fn is_noop(&self) -> bool {
        self.role_to_apply().is_none() && self.blocked_to_apply().is_none()
    }
}

/// Evaluates `request` by `actor` against `target`.
///
/// `benefactors` must be the snapshot for `actor`, computed once per request.
/// Both fields are judged against that same snapshot, so applying the role
/// change cannot influence the block decision within one request.
pub fn evaluate(
    actor: &User,
    target: &User,
    benefactors: &PriorBenefactors,
    request: &ChangeRequest,
) -> EscalationDecision {
    debug_assert!(
        benefactors.subject().is_none_or(|s| s == actor.id),
        "benefactor snapshot belongs to another user"
    );

    let retaliation = benefactors.contains(target.id);

    let role = judge(
        request.new_role.is_some(),
        policies::has_permission(actor.role, Permission::ChangeRole),
        retaliation,
    );
    let blocked = judge(
        request.blocked.is_some(),
        policies::has_permission(actor.role, Permission::BlockUser),
        retaliation,
    );

    if retaliation && (request.new_role.is_some() || request.blocked.is_some()) {
        tracing::warn!(
            actor = %actor.name,
            target = %target.name,
            "Change refused: target previously changed the actor's role"
        );
    }

    EscalationDecision {
        role,
        blocked,
        request: request.clone(),
    }
}

fn judge(requested: bool, permitted: bool, retaliation: bool) -> FieldOutcome {
    if !requested {
        FieldOutcome::NotRequested
    } else if !permitted {
        FieldOutcome::MissingPermission
    } else if retaliation {
        FieldOutcome::PriorBenefactor
    } else {
        FieldOutcome::Allowed
    }
}
