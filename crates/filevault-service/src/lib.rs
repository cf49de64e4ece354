//! # filevault-service
//!
//! Use-case layer for FileVault. Each service loads state through the store
//! traits of `filevault-database`, asks `filevault-auth` for a decision, and
//! writes the outcome back.
//!
//! Services follow constructor injection: all stores are provided at
//! construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod user;

pub use context::RequestContext;
pub use file::{FileService, UpdateFileRequest};
pub use user::UserService;
