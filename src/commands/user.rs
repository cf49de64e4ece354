//! User management CLI commands.

use clap::{ArgAction, Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use filevault_core::config::AppConfig;
use filevault_core::error::AppError;
use filevault_core::types::PageRequest;
use filevault_entity::history::ChangeRoleHistory;
use filevault_entity::user::{User, UserView};
use filevault_service::UserService;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a new user with the USER role
    Register {
        /// User name
        name: String,
    },
    /// Change a user's role and/or blocked flag (requires --as)
    Update {
        /// Target user name
        name: String,
        /// New role: USER, MODERATOR or ADMIN
        #[arg(long)]
        role: Option<String>,
        /// New blocked flag
        #[arg(long, action = ArgAction::Set)]
        blocked: Option<bool>,
    },
    /// List users
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Users per page
        #[arg(long, default_value_t = 50)]
        page_size: u64,
    },
    /// Show the role changes made to a user
    History {
        /// User name
        name: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User name
    name: String,
    /// Role
    role: String,
    /// Blocked flag
    blocked: bool,
    /// Registered at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            name: u.name.clone(),
            role: u.role.to_string(),
            blocked: u.is_blocked,
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Post-change view row
#[derive(Debug, Serialize, Tabled)]
struct ViewRow {
    /// User name
    name: String,
    /// Role
    role: String,
    /// Blocked flag
    blocked: bool,
}

impl From<&UserView> for ViewRow {
    fn from(v: &UserView) -> Self {
        Self {
            name: v.name.clone(),
            role: v.role.to_string(),
            blocked: v.is_blocked,
        }
    }
}

/// History display row
#[derive(Debug, Serialize, Tabled)]
struct HistoryRow {
    /// Acting user id
    actor_id: String,
    /// Role assigned
    new_role: String,
    /// Changed at
    changed_at: String,
}

impl From<&ChangeRoleHistory> for HistoryRow {
    fn from(h: &ChangeRoleHistory) -> Self {
        Self {
            actor_id: h.actor_id.to_string(),
            new_role: h.new_role.to_string(),
            changed_at: h.changed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
    actor: Option<&str>,
) -> Result<(), AppError> {
    let stores = super::create_stores(config).await?;
    let users = UserService::from_stores(&stores);

    match &args.command {
        UserCommand::Register { name } => {
            let user = users.register(name).await?;
            output::print_success(&format!("User '{}' registered", user.name));
        }
        UserCommand::Update {
            name,
            role,
            blocked,
        } => {
            if role.is_none() && blocked.is_none() {
                return Err(AppError::validation("Nothing to change: pass --role and/or --blocked"));
            }
            let ctx = super::authenticate(&users, actor).await?;
            let view = users
                .apply_role_and_block_change(&ctx, name, role.as_deref(), *blocked)
                .await?;

            let role_skipped = role
                .as_deref()
                .is_some_and(|r| !r.trim().eq_ignore_ascii_case(view.role.as_str()));
            let block_skipped = blocked.is_some_and(|b| b != view.is_blocked);
            if role_skipped || block_skipped {
                output::print_warning("Some changes were not applied");
            }
            format.print_item(&ViewRow::from(&view));
        }
        UserCommand::List { page, page_size } => {
            let result = users.list(&PageRequest::new(*page, *page_size)).await?;
            let rows: Vec<UserRow> = result.items.iter().map(UserRow::from).collect();
            format.print_list(&rows);
            if format == OutputFormat::Table && result.total_pages() > 1 {
                println!("Page {} of {}", result.page, result.total_pages());
            }
        }
        UserCommand::History { name } => {
            let history = users.history(name).await?;
            let rows: Vec<HistoryRow> = history.iter().map(HistoryRow::from).collect();
            format.print_list(&rows);
        }
    }

    Ok(())
}
