//! Composable file listing predicate.
//!
//! A [`FileFilter`] is the conjunction of independent [`FileCondition`]s.
//! It can be evaluated in memory with [`FileFilter::matches`] or translated
//! by a store into its native query form. Every filter built for an actor
//! carries the same read rule as [`crate::access::can_access`].

pub mod builder;
pub mod params;
pub mod spec;

pub use builder::{FileFilterBuilder, build_file_filter};
pub use params::FileFilterParams;
pub use spec::{FileCondition, FileFilter};
