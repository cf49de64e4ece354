//! Vault behaviour configuration.

use serde::{Deserialize, Serialize};

/// Settings governing file registration and bootstrap accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Files of this size or larger are rejected, in megabytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: u64,
    /// Name of the administrator account created by `filevault migrate`.
    #[serde(default = "default_admin_name")]
    pub bootstrap_admin: String,
}

impl VaultConfig {
    /// Upload size limit in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size(),
            bootstrap_admin: default_admin_name(),
        }
    }
}

fn default_max_file_size() -> u64 {
    10
}

fn default_admin_name() -> String {
    "admin".to_string()
}
