//! File metadata operations guarded by the access decision engine.

pub mod service;

pub use service::{FileService, UpdateFileRequest};
