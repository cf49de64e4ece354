//! # filevault-auth
//!
//! Authorization decisions for the FileVault platform. Everything in this
//! crate is pure and synchronous: callers pass the acting user explicitly and
//! load any stored state (history records, file rows) beforehand.
//!
//! ## Modules
//!
//! - `rbac`: static role-to-permission table and enforcement helpers
//! - `access`: owner/visibility/permission decision for a single file
//! - `escalation`: anti-retaliation guard for role and block changes
//! - `filter`: composable file listing predicate embedding the read rule

pub mod access;
pub mod escalation;
pub mod filter;
pub mod rbac;

pub use access::{AccessGrant, AccessMode, Principal, can_access, require_access};
pub use escalation::{ChangeRequest, EscalationDecision, FieldOutcome, PriorBenefactors};
pub use filter::{FileCondition, FileFilter, FileFilterBuilder, FileFilterParams};
pub use rbac::{RbacEnforcer, permissions_of};
