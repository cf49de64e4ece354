//! Change-history repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use filevault_core::error::{AppError, ErrorKind};
use filevault_core::result::AppResult;
use filevault_core::types::UserId;
use filevault_entity::history::ChangeRoleHistory;

use crate::store::HistoryLedger;

pub(crate) const FIND_BY_TARGET: &str =
    "SELECT * FROM change_role_history WHERE target_id = $1 ORDER BY changed_at ASC, id ASC";

/// Read-only view of the append-only ledger.
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    pool: PgPool,
}

impl HistoryRepository {
    /// Create a new history repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryLedger for HistoryRepository {
    async fn find_history_by_target(&self, target_id: UserId) -> AppResult<Vec<ChangeRoleHistory>> {
        sqlx::query_as::<_, ChangeRoleHistory>(FIND_BY_TARGET)
            .bind(target_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load role history", e))
    }
}
