//! File metadata repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use filevault_auth::{AccessMode, FileCondition, FileFilter};
use filevault_core::error::{AppError, ErrorKind};
use filevault_core::result::AppResult;
use filevault_core::types::FileId;
use filevault_entity::file::FileMetadata;

use crate::store::FileStore;

/// Repository for file metadata.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes `LIKE` wildcards so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Folds `A`-`Z` only, matching `str::to_ascii_lowercase` regardless of
/// the database collation.
const ASCII_FOLD: &str =
    "translate(name, 'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz')";

/// Appends one `AND ...` clause per condition.
fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, filter: &FileFilter) {
    for condition in filter.conditions() {
        match condition {
            FileCondition::NameContains(needle) => {
                qb.push(" AND ")
                    .push(ASCII_FOLD)
                    .push(" LIKE ")
                    .push_bind(format!("%{}%", escape_like(needle)))
                    .push(" ESCAPE '\\'");
            }
            FileCondition::UploadedFrom(from) => {
                qb.push(" AND uploaded_at >= ").push_bind(*from);
            }
            FileCondition::UploadedTo(to) => {
                qb.push(" AND uploaded_at <= ").push_bind(*to);
            }
            FileCondition::ModifiedFrom(from) => {
                qb.push(" AND modified_at >= ").push_bind(*from);
            }
            FileCondition::ModifiedTo(to) => {
                qb.push(" AND modified_at <= ").push_bind(*to);
            }
            FileCondition::ExtensionIn(extensions) => {
                let values: Vec<String> = extensions.iter().cloned().collect();
                qb.push(" AND extension = ANY(").push_bind(values).push(")");
            }
            FileCondition::ReadableBy(principal) => {
                let mode = AccessMode::READ;
                if mode.granted_by_role(principal.role) {
                    continue;
                }
                qb.push(" AND (owner_id = ").push_bind(principal.user_id);
                if mode.allow_if_public {
                    qb.push(" OR is_public");
                }
                qb.push(")");
            }
        }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn find_file(&self, id: FileId) -> AppResult<Option<FileMetadata>> {
        sqlx::query_as::<_, FileMetadata>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_matching(&self, filter: &FileFilter) -> AppResult<Vec<FileMetadata>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM files WHERE TRUE");
        push_conditions(&mut qb, filter);
        qb.push(" ORDER BY uploaded_at ASC, id ASC");

        qb.build_query_as::<FileMetadata>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search files", e))
    }

    async fn insert_file(&self, file: &FileMetadata) -> AppResult<FileMetadata> {
        sqlx::query_as::<_, FileMetadata>(
            "INSERT INTO files (id, owner_id, name, extension, comment, size_bytes, is_public, \
             uploaded_at, modified_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(file.id)
        .bind(file.owner_id)
        .bind(&file.name)
        .bind(&file.extension)
        .bind(&file.comment)
        .bind(file.size_bytes)
        .bind(file.is_public)
        .bind(file.uploaded_at)
        .bind(file.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert file", e))
    }

    async fn update_file(&self, file: &FileMetadata) -> AppResult<FileMetadata> {
        sqlx::query_as::<_, FileMetadata>(
            "UPDATE files SET name = $2, extension = $3, comment = $4, is_public = $5, \
             modified_at = $6 WHERE id = $1 RETURNING *",
        )
        .bind(file.id)
        .bind(&file.name)
        .bind(&file.extension)
        .bind(&file.comment)
        .bind(file.is_public)
        .bind(file.modified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {} not found", file.id)))
    }

    async fn delete_file(&self, id: FileId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filevault_auth::{FileFilterBuilder, Principal};
    use filevault_core::types::UserId;
    use filevault_entity::user::UserRole;

    fn render(filter: &FileFilter) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM files WHERE TRUE");
        push_conditions(&mut qb, filter);
        qb.sql().to_string()
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_reader_role_adds_no_visibility_clause() {
        let admin = Principal::new(UserId::new(), UserRole::Admin);
        let sql = render(&FileFilterBuilder::for_actor(admin).build());
        assert_eq!(sql, "SELECT * FROM files WHERE TRUE");
    }

    #[test]
    fn test_user_is_limited_to_owned_or_public() {
        let user = Principal::new(UserId::new(), UserRole::User);
        let filter = FileFilterBuilder::for_actor(user)
            .name_contains("Report")
            .extension_in(["pdf"])
            .build();
        let sql = render(&filter);
        assert_eq!(
            sql,
            "SELECT * FROM files WHERE TRUE AND (owner_id = $1 OR is_public) \
             AND translate(name, 'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz') \
             LIKE $2 ESCAPE '\\' AND extension = ANY($3)"
        );
    }
}
