//! User domain entities.

pub mod model;
pub mod role;

pub use model::{User, UserView};
pub use role::{Role, UserRole};
