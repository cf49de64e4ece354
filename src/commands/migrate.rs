//! Database migration command.

use filevault_core::config::AppConfig;
use filevault_core::error::AppError;
use filevault_database::migration;

use crate::output;

/// Run all pending migrations, then make sure the bootstrap admin exists
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let version = db.server_version().await?;

    println!("Running database migrations on PostgreSQL {version}...");
    migration::run_migrations(db.pool()).await?;
    output::print_success("All migrations applied successfully.");

    let admin = &config.vault.bootstrap_admin;
    if migration::seed_admin(db.pool(), admin).await? {
        output::print_success(&format!("Administrator '{admin}' created."));
    }

    db.close().await;
    Ok(())
}
