//! File access decisions based on ownership, visibility, and role permissions.

pub mod decision;
pub mod mode;

pub use decision::{AccessGrant, Principal, can_access, decide, require_access};
pub use mode::AccessMode;
