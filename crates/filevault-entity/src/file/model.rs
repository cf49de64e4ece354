//! File metadata entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use filevault_core::types::{FileId, UserId};

/// Metadata for a file stored in the vault.
///
/// The content itself lives with the storage collaborator; this row is what
/// authorization and listing operate on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileMetadata {
    /// Unique file identifier.
    pub id: FileId,
    /// The owning user. Fixed at creation.
    pub owner_id: UserId,
    /// File name without the extension.
    pub name: String,
    /// Lowercase extension without the leading dot (may be empty).
    pub extension: String,
    /// Free-form comment supplied by the uploader.
    pub comment: Option<String>,
    /// Content size in bytes.
    pub size_bytes: i64,
    /// Whether any user may read this file.
    pub is_public: bool,
    /// When the file was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// When the metadata was last modified.
    pub modified_at: DateTime<Utc>,
}

impl FileMetadata {
    /// Build metadata for a newly uploaded, private file.
    pub fn new(owner_id: UserId, file_name: FileName, comment: Option<String>, size_bytes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: FileId::new(),
            owner_id,
            name: file_name.name,
            extension: file_name.extension,
            comment,
            size_bytes,
            is_public: false,
            uploaded_at: now,
            modified_at: now,
        }
    }

    /// Whether `user_id` owns this file.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// The name with its extension re-attached.
    pub fn full_name(&self) -> String {
        if self.extension.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.extension)
        }
    }
}

/// A file name split into stem and lowercase extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileName {
    /// Name without the extension.
    pub name: String,
    /// Lowercase extension, empty when the name has none.
    pub extension: String,
}

impl FileName {
    /// Split `full` at its last dot. A leading dot (`.env`) is part of the
    /// name, not an extension separator.
    pub fn parse(full: &str) -> Self {
        match full.rfind('.') {
            Some(pos) if pos > 0 => Self {
                name: full[..pos].to_string(),
                extension: full[pos + 1..].to_ascii_lowercase(),
            },
            _ => Self {
                name: full.to_string(),
                extension: String::new(),
            },
        }
    }
}

/// An id/name pair used by name-only listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNameById {
    /// File identifier.
    pub id: FileId,
    /// Full file name including the extension.
    pub name: String,
}

impl From<&FileMetadata> for FileNameById {
    fn from(file: &FileMetadata) -> Self {
        Self {
            id: file.id,
            name: file.full_name(),
        }
    }
}
