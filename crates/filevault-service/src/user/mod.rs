//! User registration, authentication, and role/block changes.

pub mod service;

pub use service::UserService;
