//! PostgreSQL implementations of the store traits.

pub mod account;
pub mod file;
pub mod history;
pub mod role;
pub mod user;

pub use account::{AccountRepository, PgAccountTransaction};
pub use file::FileRepository;
pub use history::HistoryRepository;
pub use role::RoleRepository;
pub use user::UserRepository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::store::Stores;

impl Stores {
    /// Build every store over one PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            roles: Arc::new(RoleRepository::new(pool.clone())),
            history: Arc::new(HistoryRepository::new(pool.clone())),
            files: Arc::new(FileRepository::new(pool.clone())),
            accounts: Arc::new(AccountRepository::new(pool)),
        }
    }
}
