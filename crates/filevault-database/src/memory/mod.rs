//! In-memory store using a Tokio mutex, for tests and single-process runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use filevault_auth::FileFilter;
use filevault_core::error::AppError;
use filevault_core::result::AppResult;
use filevault_core::types::{FileId, PageRequest, PageResponse, UserId};
use filevault_entity::file::FileMetadata;
use filevault_entity::history::ChangeRoleHistory;
use filevault_entity::user::{Role, User, UserRole};

use crate::store::{
    AccountStore, AccountTransaction, FileStore, HistoryLedger, RoleStore, Stores, UserStore,
};

/// Internal state shared by every handle to the store.
#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    roles: Vec<Role>,
    history: Vec<ChangeRoleHistory>,
    files: HashMap<FileId, FileMetadata>,
}

impl MemoryState {
    fn user_by_name(&self, name: &str) -> Option<&User> {
        self.users.values().find(|u| u.name == name)
    }

    fn history_for(&self, target_id: UserId) -> impl Iterator<Item = &ChangeRoleHistory> {
        self.history.iter().filter(move |h| h.target_id == target_id)
    }
}

/// In-memory implementation of every store trait.
///
/// An open [`AccountTransaction`] holds the state lock until it is
/// committed or dropped, so transactions are fully serialized.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Creates an empty store with one role row per [`UserRole`].
    pub fn new() -> Self {
        let state = MemoryState {
            roles: UserRole::ALL.into_iter().map(Role::seed).collect(),
            ..Default::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Removes the stored row for `name`, leaving the enum value itself valid.
    pub async fn remove_role(&self, name: UserRole) {
        self.state.lock().await.roles.retain(|r| r.name != name);
    }

    /// Number of history records stored.
    pub async fn history_len(&self) -> usize {
        self.state.lock().await.history.len()
    }

    /// Builds a [`Stores`] set in which every store is this one.
    pub fn stores(&self) -> Stores {
        Stores {
            users: Arc::new(self.clone()),
            roles: Arc::new(self.clone()),
            history: Arc::new(self.clone()),
            files: Arc::new(self.clone()),
            accounts: Arc::new(self.clone()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_name(&self, name: &str) -> AppResult<Option<User>> {
        Ok(self.state.lock().await.user_by_name(name).cloned())
    }

    async fn create_user(&self, user: &User) -> AppResult<User> {
        let mut state = self.state.lock().await;
        if state.user_by_name(&user.name).is_some() {
            return Err(AppError::conflict(format!("User '{}' already exists", user.name)));
        }
        state.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn list_users(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let state = self.state.lock().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        let total = users.len() as u64;
        let items = users
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page, total))
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn find_role_by_name(&self, name: UserRole) -> AppResult<Option<Role>> {
        let state = self.state.lock().await;
        Ok(state.roles.iter().find(|r| r.name == name).cloned())
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let mut roles = self.state.lock().await.roles.clone();
        roles.sort_by_key(|r| r.name);
        Ok(roles)
    }
}

#[async_trait]
impl HistoryLedger for MemoryStore {
    async fn find_history_by_target(&self, target_id: UserId) -> AppResult<Vec<ChangeRoleHistory>> {
        let state = self.state.lock().await;
        Ok(state.history_for(target_id).cloned().collect())
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn find_file(&self, id: FileId) -> AppResult<Option<FileMetadata>> {
        Ok(self.state.lock().await.files.get(&id).cloned())
    }

    async fn find_matching(&self, filter: &FileFilter) -> AppResult<Vec<FileMetadata>> {
        let state = self.state.lock().await;
        let mut files: Vec<&FileMetadata> = state.files.values().collect();
        files.sort_by(|a, b| (a.uploaded_at, a.id).cmp(&(b.uploaded_at, b.id)));
        Ok(filter.apply(files).cloned().collect())
    }

    async fn insert_file(&self, file: &FileMetadata) -> AppResult<FileMetadata> {
        let mut state = self.state.lock().await;
        if state.files.contains_key(&file.id) {
            return Err(AppError::conflict(format!("File {} already exists", file.id)));
        }
        state.files.insert(file.id, file.clone());
        Ok(file.clone())
    }

    async fn update_file(&self, file: &FileMetadata) -> AppResult<FileMetadata> {
        let mut state = self.state.lock().await;
        let stored = state
            .files
            .get_mut(&file.id)
            .ok_or_else(|| AppError::not_found(format!("File {} not found", file.id)))?;
        stored.name = file.name.clone();
        stored.extension = file.extension.clone();
        stored.comment = file.comment.clone();
        stored.is_public = file.is_public;
        stored.modified_at = file.modified_at;
        Ok(stored.clone())
    }

    async fn delete_file(&self, id: FileId) -> AppResult<bool> {
        Ok(self.state.lock().await.files.remove(&id).is_some())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn AccountTransaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        Ok(Box::new(MemoryTransaction {
            guard,
            users: HashMap::new(),
            history: Vec::new(),
        }))
    }
}

/// Changes staged against a locked [`MemoryState`].
///
/// Nothing reaches the shared state until commit.
struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    users: HashMap<UserId, User>,
    history: Vec<ChangeRoleHistory>,
}

#[async_trait]
impl AccountTransaction for MemoryTransaction {
    async fn lock_users(&mut self, names: &[&str]) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .guard
            .users
            .values()
            .filter(|u| names.contains(&u.name.as_str()))
            .map(|u| self.users.get(&u.id).unwrap_or(u).clone())
            .collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn find_history_by_target(
        &mut self,
        target_id: UserId,
    ) -> AppResult<Vec<ChangeRoleHistory>> {
        Ok(self
            .guard
            .history_for(target_id)
            .chain(self.history.iter().filter(|h| h.target_id == target_id))
            .cloned()
            .collect())
    }

    async fn find_role_by_name(&mut self, name: UserRole) -> AppResult<Option<Role>> {
        Ok(self.guard.roles.iter().find(|r| r.name == name).cloned())
    }

    async fn append_history(&mut self, record: &ChangeRoleHistory) -> AppResult<()> {
        self.history.push(record.clone());
        Ok(())
    }

    async fn save_user(&mut self, user: &User) -> AppResult<()> {
        if !self.guard.users.contains_key(&user.id) {
            return Err(AppError::not_found(format!("User '{}' not found", user.name)));
        }
        let mut user = user.clone();
        user.updated_at = Utc::now();
        self.users.insert(user.id, user);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryTransaction {
            mut guard,
            users,
            history,
        } = *self;
        guard.users.extend(users);
        guard.history.extend(history);
        Ok(())
    }
}
