//! File metadata operations with access enforcement.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use filevault_auth::filter::build_file_filter;
use filevault_auth::{AccessMode, FileFilterParams, RbacEnforcer, require_access};
use filevault_core::config::VaultConfig;
use filevault_core::error::AppError;
use filevault_core::types::FileId;
use filevault_database::store::{FileStore, Stores};
use filevault_entity::file::{FileMetadata, FileName, FileNameById};
use filevault_entity::permission::Permission;

use crate::context::RequestContext;

/// Handles file metadata with owner, visibility, and role checks.
#[derive(Clone)]
pub struct FileService {
    /// File metadata store.
    files: Arc<dyn FileStore>,
    /// RBAC enforcer.
    rbac: RbacEnforcer,
    /// Upload limits.
    vault: VaultConfig,
}

/// Data for updating a file's mutable fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFileRequest {
    /// New full name, extension included.
    pub name: Option<String>,
    /// New comment.
    pub comment: Option<String>,
    /// New visibility.
    pub is_public: Option<bool>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(files: Arc<dyn FileStore>, vault: VaultConfig) -> Self {
        Self {
            files,
            rbac: RbacEnforcer::new(),
            vault,
        }
    }

    /// Creates a file service over a full store set.
    pub fn from_stores(stores: &Stores, vault: VaultConfig) -> Self {
        Self::new(Arc::clone(&stores.files), vault)
    }

    /// Records metadata for a file uploaded by the actor.
    ///
    /// The file starts private. Sizes at or above the configured limit are
    /// rejected.
    pub async fn register(
        &self,
        ctx: &RequestContext,
        full_name: &str,
        comment: Option<String>,
        size_bytes: u64,
    ) -> Result<FileMetadata, AppError> {
        self.rbac.require_permission(ctx.role, Permission::FileWrite)?;

        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }
        let limit = self.vault.max_file_size_bytes();
        if size_bytes >= limit {
            return Err(AppError::validation(format!(
                "File is too large: {size_bytes} bytes, limit is {limit} bytes"
            )));
        }
        let size_bytes = i64::try_from(size_bytes)
            .map_err(|_| AppError::validation("File size out of range"))?;

        let file = FileMetadata::new(ctx.user_id, FileName::parse(full_name), comment, size_bytes);
        let file = self.files.insert_file(&file).await?;

        info!(
            file_id = %file.id,
            owner = %ctx.username,
            name = %file.full_name(),
            size_bytes = file.size_bytes,
            "File registered"
        );
        Ok(file)
    }

    /// Gets a file the actor may read.
    pub async fn get(&self, ctx: &RequestContext, id: FileId) -> Result<FileMetadata, AppError> {
        let file = self.load(id).await?;
        self.check(ctx, &file, AccessMode::READ)?;
        Ok(file)
    }

    /// Renames, re-comments, or toggles the visibility of a file.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: FileId,
        req: UpdateFileRequest,
    ) -> Result<FileMetadata, AppError> {
        let mut file = self.load(id).await?;
        self.check(ctx, &file, AccessMode::UPDATE)?;

        if let Some(name) = req.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::validation("File name cannot be empty"));
            }
            let parsed = FileName::parse(name);
            file.name = parsed.name;
            file.extension = parsed.extension;
        }
        if let Some(comment) = req.comment {
            file.comment = Some(comment);
        }
        if let Some(is_public) = req.is_public {
            file.is_public = is_public;
        }
        file.modified_at = Utc::now();

        let file = self.files.update_file(&file).await?;
        info!(
            file_id = %file.id,
            actor = %ctx.username,
            is_public = file.is_public,
            "File updated"
        );
        Ok(file)
    }

    /// Deletes a file, returning its last metadata.
    pub async fn delete(&self, ctx: &RequestContext, id: FileId) -> Result<FileMetadata, AppError> {
        let file = self.load(id).await?;
        self.check(ctx, &file, AccessMode::DELETE)?;

        if !self.files.delete_file(id).await? {
            return Err(AppError::not_found(format!("File {id} not found")));
        }
        info!(file_id = %id, actor = %ctx.username, "File deleted");
        Ok(file)
    }

    /// Lists the files matching `params` that the actor may read.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        params: &FileFilterParams,
    ) -> Result<Vec<FileMetadata>, AppError> {
        let filter = build_file_filter(params, ctx.principal());
        self.files.find_matching(&filter).await
    }

    /// Id/name pairs of every file the actor may read.
    pub async fn names(&self, ctx: &RequestContext) -> Result<Vec<FileNameById>, AppError> {
        let files = self.list(ctx, &FileFilterParams::default()).await?;
        Ok(files.iter().map(FileNameById::from).collect())
    }

    /// Reads several files at once, failing if any one is missing or
    /// unreadable.
    pub async fn get_many(
        &self,
        ctx: &RequestContext,
        ids: &[FileId],
    ) -> Result<Vec<FileMetadata>, AppError> {
        let mut files = Vec::with_capacity(ids.len());
        for id in ids {
            files.push(self.get(ctx, *id).await?);
        }
        Ok(files)
    }

    async fn load(&self, id: FileId) -> Result<FileMetadata, AppError> {
        self.files
            .find_file(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    fn check(&self, ctx: &RequestContext, file: &FileMetadata, mode: AccessMode) -> Result<(), AppError> {
        require_access(ctx.principal(), file, mode.required, mode.allow_if_public).map(|_| ())
    }
}
