//! PostgreSQL pool setup.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use filevault_core::config::DatabaseConfig;
use filevault_core::error::{AppError, ErrorKind};

/// Owns the sqlx pool shared by every repository.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Opens a pool sized and timed by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let target = redact_url(&config.url);
        info!(
            url = %target,
            max_connections = config.max_connections,
            "Opening PostgreSQL pool"
        );

        let options = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        let pool = options.connect(&config.url).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Cannot reach database at {target}: {e}"),
                e,
            )
        })?;

        Ok(Self { pool })
    }

    /// The sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trips to the server and returns its version string.
    pub async fn server_version(&self) -> Result<String, AppError> {
        let version: String = sqlx::query_scalar("SHOW server_version")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Database ping failed", e))?;
        debug!(version = %version, "Database reachable");
        Ok(version)
    }

    /// Waits for in-flight queries, then closes every connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Replaces the password in a connection URL with `****`.
fn redact_url(url: &str) -> String {
    let authority_start = url.find("://").map_or(0, |p| p + 3);
    let Some(at) = url.rfind('@').filter(|&at| at > authority_start) else {
        return url.to_string();
    };
    match url[authority_start..at].find(':') {
        Some(colon) => {
            let user_end = authority_start + colon;
            format!("{}:****{}", &url[..user_end], &url[at..])
        }
        None => url.to_string(),
    }
}
