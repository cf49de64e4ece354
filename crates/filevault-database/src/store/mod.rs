//! Storage traits consumed by the service layer.
//!
//! Each trait has a PostgreSQL implementation in [`crate::repositories`] and
//! an in-memory one in [`crate::MemoryStore`].

use std::sync::Arc;

use async_trait::async_trait;

use filevault_auth::FileFilter;
use filevault_core::result::AppResult;
use filevault_core::types::{FileId, PageRequest, PageResponse, UserId};
use filevault_entity::file::FileMetadata;
use filevault_entity::history::ChangeRoleHistory;
use filevault_entity::user::{Role, User, UserRole};

/// User lookup and registration.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by exact name.
    async fn find_user_by_name(&self, name: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with `Conflict` if the name is taken.
    async fn create_user(&self, user: &User) -> AppResult<User>;

    /// List users ordered by name.
    async fn list_users(&self, page: &PageRequest) -> AppResult<PageResponse<User>>;
}

/// Read access to the role table.
#[async_trait]
pub trait RoleStore: Send + Sync + 'static {
    /// Find the stored role row for `name`.
    async fn find_role_by_name(&self, name: UserRole) -> AppResult<Option<Role>>;

    /// List every stored role.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;
}

/// Read access to the change-history ledger outside a transaction.
#[async_trait]
pub trait HistoryLedger: Send + Sync + 'static {
    /// Records whose target is `target_id`, oldest first.
    async fn find_history_by_target(&self, target_id: UserId) -> AppResult<Vec<ChangeRoleHistory>>;
}

/// File metadata persistence.
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    /// Find a file by id.
    async fn find_file(&self, id: FileId) -> AppResult<Option<FileMetadata>>;

    /// Files matching every condition of `filter`, oldest upload first.
    async fn find_matching(&self, filter: &FileFilter) -> AppResult<Vec<FileMetadata>>;

    /// Insert new metadata.
    async fn insert_file(&self, file: &FileMetadata) -> AppResult<FileMetadata>;

    /// Overwrite the mutable fields of an existing file.
    async fn update_file(&self, file: &FileMetadata) -> AppResult<FileMetadata>;

    /// Delete a file. Returns `false` if it did not exist.
    async fn delete_file(&self, id: FileId) -> AppResult<bool>;
}

/// Opens transactions over user accounts and the ledger.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Begin a transaction. Dropping it without commit rolls back.
    async fn begin(&self) -> AppResult<Box<dyn AccountTransaction>>;
}

/// A unit of work spanning user rows and history records.
///
/// Users returned by [`AccountTransaction::lock_users`] stay locked until the
/// transaction ends, so concurrent role changes touching the same users
/// are serialized.
#[async_trait]
pub trait AccountTransaction: Send {
    /// Lock and return the users named in `names`. Missing names are
    /// omitted from the result.
    async fn lock_users(&mut self, names: &[&str]) -> AppResult<Vec<User>>;

    /// Records whose target is `target_id`, as seen by this transaction.
    async fn find_history_by_target(&mut self, target_id: UserId) -> AppResult<Vec<ChangeRoleHistory>>;

    /// Find the stored role row for `name`.
    async fn find_role_by_name(&mut self, name: UserRole) -> AppResult<Option<Role>>;

    /// Append a history record.
    async fn append_history(&mut self, record: &ChangeRoleHistory) -> AppResult<()>;

    /// Persist the role, blocked flag and update time of `user`.
    async fn save_user(&mut self, user: &User) -> AppResult<()>;

    /// Make every change visible atomically.
    async fn commit(self: Box<Self>) -> AppResult<()>;
}

/// The full set of stores a service layer is built from.
#[derive(Clone)]
pub struct Stores {
    /// User lookup and registration.
    pub users: Arc<dyn UserStore>,
    /// Seeded role rows.
    pub roles: Arc<dyn RoleStore>,
    /// Change-history reads.
    pub history: Arc<dyn HistoryLedger>,
    /// File metadata.
    pub files: Arc<dyn FileStore>,
    /// Role and block-change transactions.
    pub accounts: Arc<dyn AccountStore>,
}
