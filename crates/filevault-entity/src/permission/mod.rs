//! Permission tokens checked against a role's granted set.

pub mod model;

pub use model::Permission;
