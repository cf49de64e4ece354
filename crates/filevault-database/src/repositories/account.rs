//! Transactional access to user accounts and the change-history ledger.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};

use filevault_core::error::{AppError, ErrorKind};
use filevault_core::result::AppResult;
use filevault_core::types::UserId;
use filevault_entity::history::ChangeRoleHistory;
use filevault_entity::user::{Role, User, UserRole};

use super::history::FIND_BY_TARGET;
use crate::store::{AccountStore, AccountTransaction};

/// Opens PostgreSQL transactions for role and block changes.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn begin(&self) -> AppResult<Box<dyn AccountTransaction>> {
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        Ok(Box::new(PgAccountTransaction { tx }))
    }
}

/// A PostgreSQL transaction. Rolled back by sqlx when dropped uncommitted.
pub struct PgAccountTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl AccountTransaction for PgAccountTransaction {
    async fn lock_users(&mut self, names: &[&str]) -> AppResult<Vec<User>> {
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        // Fixed lock order keeps two crossing requests from deadlocking.
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE name = ANY($1) ORDER BY id FOR UPDATE",
        )
        .bind(names)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock users", e))
    }

    async fn find_history_by_target(
        &mut self,
        target_id: UserId,
    ) -> AppResult<Vec<ChangeRoleHistory>> {
        sqlx::query_as::<_, ChangeRoleHistory>(FIND_BY_TARGET)
            .bind(target_id)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load role history", e))
    }

    async fn find_role_by_name(&mut self, name: UserRole) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role", e))
    }

    async fn append_history(&mut self, record: &ChangeRoleHistory) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO change_role_history (id, actor_id, target_id, new_role, changed_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.id)
        .bind(record.actor_id)
        .bind(record.target_id)
        .bind(record.new_role)
        .bind(record.changed_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append role history", e))?;
        Ok(())
    }

    async fn save_user(&mut self, user: &User) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET role = $2, is_blocked = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(user.id)
        .bind(user.role)
        .bind(user.is_blocked)
        .bind(Utc::now())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User '{}' not found", user.name)));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e))
    }
}
