//! Schema migrations and bootstrap data.

use sqlx::PgPool;
use tracing::info;

use filevault_core::error::{AppError, ErrorKind};
use filevault_core::types::UserId;
use filevault_entity::user::UserRole;

/// Applies every pending migration under `migrations/`.
///
/// The initial migration also seeds one `roles` row per [`UserRole`].
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// Creates the bootstrap administrator unless a user with that name exists.
///
/// Returns `true` when a new account was inserted.
pub async fn seed_admin(pool: &PgPool, name: &str) -> Result<bool, AppError> {
    let result = sqlx::query(
        "INSERT INTO users (id, name, role, is_blocked) VALUES ($1, $2, $3, FALSE) \
         ON CONFLICT (name) DO NOTHING",
    )
    .bind(UserId::new())
    .bind(name)
    .bind(UserRole::Admin)
    .execute(pool)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed admin user", e))?;

    let created = result.rows_affected() > 0;
    if created {
        info!(name = %name, "Bootstrap administrator created");
    }
    Ok(created)
}
