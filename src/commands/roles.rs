//! Role listing command.

use serde::Serialize;
use tabled::Tabled;

use filevault_auth::permissions_of;
use filevault_core::config::AppConfig;
use filevault_core::error::AppError;
use filevault_service::UserService;

use crate::output::OutputFormat;

/// Role display row
#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    /// Role name
    role: String,
    /// Permissions granted by the role
    permissions: String,
}

/// List stored roles with the permissions each one grants
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let stores = super::create_stores(config).await?;
    let users = UserService::from_stores(&stores);

    let rows: Vec<RoleRow> = users
        .list_roles()
        .await?
        .iter()
        .map(|r| RoleRow {
            role: r.name.to_string(),
            permissions: permissions_of(r.name)
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    format.print_list(&rows);
    Ok(())
}
