//! File metadata entities.

pub mod model;

pub use model::{FileMetadata, FileName, FileNameById};
