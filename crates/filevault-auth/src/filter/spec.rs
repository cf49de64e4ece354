//! Filter conditions and their in-memory evaluation.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filevault_entity::file::FileMetadata;

use crate::access::{AccessMode, Principal, can_access};

/// One independent constraint on file metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FileCondition {
    /// The name contains this ASCII-lowercased needle, ignoring ASCII case.
    NameContains(String),
    /// Uploaded at or after this instant.
    UploadedFrom(DateTime<Utc>),
    /// Uploaded at or before this instant.
    UploadedTo(DateTime<Utc>),
    /// Modified at or after this instant.
    ModifiedFrom(DateTime<Utc>),
    /// Modified at or before this instant.
    ModifiedTo(DateTime<Utc>),
    /// The extension is one of these lowercase values. Never empty.
    ExtensionIn(BTreeSet<String>),
    /// The principal could read the file directly.
    ReadableBy(Principal),
}

impl FileCondition {
    /// Evaluates this condition against one file.
    pub fn matches(&self, file: &FileMetadata) -> bool {
        match self {
            Self::NameContains(needle) => file.name.to_ascii_lowercase().contains(needle.as_str()),
            Self::UploadedFrom(from) => file.uploaded_at >= *from,
            Self::UploadedTo(to) => file.uploaded_at <= *to,
            Self::ModifiedFrom(from) => file.modified_at >= *from,
            Self::ModifiedTo(to) => file.modified_at <= *to,
            Self::ExtensionIn(extensions) => extensions.contains(&file.extension),
            Self::ReadableBy(principal) => can_access(
                *principal,
                file,
                AccessMode::READ.required,
                AccessMode::READ.allow_if_public,
            ),
        }
    }
}

/// A conjunction of [`FileCondition`]s.
///
/// An empty filter matches every file; filters built for an actor always
/// include a [`FileCondition::ReadableBy`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    conditions: Vec<FileCondition>,
}

impl FileFilter {
    pub(crate) fn from_conditions(conditions: Vec<FileCondition>) -> Self {
        Self { conditions }
    }

    /// The conditions, in the order they were added.
    pub fn conditions(&self) -> &[FileCondition] {
        &self.conditions
    }

    /// Whether every condition holds for `file`.
    pub fn matches(&self, file: &FileMetadata) -> bool {
        self.conditions.iter().all(|c| c.matches(file))
    }

    /// Keeps the files that match, preserving order.
    pub fn apply<'a, I>(&'a self, files: I) -> impl Iterator<Item = &'a FileMetadata> + 'a
    where
        I: IntoIterator<Item = &'a FileMetadata>,
        I::IntoIter: 'a,
    {
        files.into_iter().filter(move |f| self.matches(f))
    }
}
