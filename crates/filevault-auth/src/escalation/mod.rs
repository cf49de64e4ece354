//! Anti-retaliation guard for role and block-status changes.
//!
//! A user may not change the role or blocked flag of anyone who has
//! previously changed theirs. The ledger of past changes is loaded by the
//! caller; this module only decides.

pub mod benefactors;
pub mod guard;

pub use benefactors::PriorBenefactors;
pub use guard::{ChangeRequest, EscalationDecision, FieldOutcome, evaluate};
