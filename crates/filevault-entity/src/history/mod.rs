//! Role/block change ledger entities.

pub mod model;

pub use model::ChangeRoleHistory;
