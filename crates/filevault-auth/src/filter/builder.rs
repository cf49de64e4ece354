//! Builder accumulating filter conditions for one actor.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::access::Principal;

use super::params::FileFilterParams;
use super::spec::{FileCondition, FileFilter};

/// Accumulates independent conditions and ANDs them.
///
/// The builder is created for an actor and always contributes the read rule
/// for that actor, so a built filter never lists a file the actor could not
/// open directly.
#[derive(Debug, Clone)]
pub struct FileFilterBuilder {
    conditions: Vec<FileCondition>,
}

impl FileFilterBuilder {
    /// Starts a filter listing only files readable by `actor`.
    pub fn for_actor(actor: Principal) -> Self {
        Self {
            conditions: vec![FileCondition::ReadableBy(actor)],
        }
    }

    /// Requires the name to contain `needle`, ignoring ASCII case. Non-ASCII
    /// letters compare exactly. An empty needle adds nothing.
    pub fn name_contains(mut self, needle: &str) -> Self {
        if !needle.is_empty() {
            self.conditions
                .push(FileCondition::NameContains(needle.to_ascii_lowercase()));
        }
        self
    }

    /// Restricts the upload time to `[from, to]`; either bound may be open.
    pub fn uploaded_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        if let Some(from) = from {
            self.conditions.push(FileCondition::UploadedFrom(from));
        }
        if let Some(to) = to {
            self.conditions.push(FileCondition::UploadedTo(to));
        }
        self
    }

    /// Restricts the modification time to `[from, to]`; either bound may be open.
    pub fn modified_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        if let Some(from) = from {
            self.conditions.push(FileCondition::ModifiedFrom(from));
        }
        if let Some(to) = to {
            self.conditions.push(FileCondition::ModifiedTo(to));
        }
        self
    }

    /// Restricts the extension to one of `extensions`.
    ///
    /// Values are ASCII-lowercased and stripped of a leading dot; blanks are
    /// dropped. Nothing is added when no value remains.
    pub fn extension_in<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<String> = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        if !set.is_empty() {
            self.conditions.push(FileCondition::ExtensionIn(set));
        }
        self
    }

    /// Finishes the filter.
    pub fn build(self) -> FileFilter {
        FileFilter::from_conditions(self.conditions)
    }
}

/// Builds the listing filter for `params` as seen by `actor`.
pub fn build_file_filter(params: &FileFilterParams, actor: Principal) -> FileFilter {
    let mut builder = FileFilterBuilder::for_actor(actor)
        .uploaded_between(params.upload_date_from, params.upload_date_to)
        .modified_between(params.modified_date_from, params.modified_date_to)
        .extension_in(&params.extensions);
    if let Some(name) = params.name.as_deref() {
        builder = builder.name_contains(name);
    }
    builder.build()
}
