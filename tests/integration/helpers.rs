//! Shared test helpers for integration tests.

#![allow(dead_code)]

use filevault_core::config::VaultConfig;
use filevault_database::{MemoryStore, UserStore};
use filevault_entity::file::FileMetadata;
use filevault_entity::user::{User, UserRole};
use filevault_service::{FileService, RequestContext, UserService};

/// Services wired over one in-memory store.
pub struct TestApp {
    /// The backing store, for direct inspection
    pub store: MemoryStore,
    /// User service under test
    pub users: UserService,
    /// File service under test
    pub files: FileService,
}

impl TestApp {
    /// Create a new test application with the default vault limits
    pub fn new() -> Self {
        Self::with_vault(VaultConfig::default())
    }

    /// Create a new test application with custom vault limits
    pub fn with_vault(vault: VaultConfig) -> Self {
        let store = MemoryStore::new();
        let stores = store.stores();
        Self {
            users: UserService::from_stores(&stores),
            files: FileService::from_stores(&stores, vault),
            store,
        }
    }

    /// Insert a user with the given role directly into the store
    pub async fn create_user(&self, name: &str, role: UserRole) -> User {
        self.store
            .create_user(&User::new(name, role))
            .await
            .expect("Failed to create test user")
    }

    /// Resolve a request context for `name`
    pub async fn login(&self, name: &str) -> RequestContext {
        self.users
            .authenticate(name)
            .await
            .expect("Failed to authenticate test user")
    }

    /// Create a user and return their request context
    pub async fn actor(&self, name: &str, role: UserRole) -> RequestContext {
        self.create_user(name, role).await;
        self.login(name).await
    }

    /// Current stored state of `name`
    pub async fn reload(&self, name: &str) -> User {
        self.store
            .find_user_by_name(name)
            .await
            .expect("Failed to load test user")
            .expect("Test user missing")
    }

    /// Register a file for `ctx`, optionally making it public
    pub async fn upload(&self, ctx: &RequestContext, name: &str, public: bool) -> FileMetadata {
        let file = self
            .files
            .register(ctx, name, None, 1024)
            .await
            .expect("Failed to register test file");
        if !public {
            return file;
        }
        self.files
            .update(
                ctx,
                file.id,
                filevault_service::UpdateFileRequest {
                    is_public: Some(true),
                    ..Default::default()
                },
            )
            .await
            .expect("Failed to publish test file")
    }
}
