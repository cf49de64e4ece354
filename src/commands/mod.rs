//! CLI command definitions and dispatch.

pub mod file;
pub mod migrate;
pub mod roles;
pub mod user;

use clap::{Parser, Subcommand};

use filevault_core::config::AppConfig;
use filevault_core::error::AppError;
use filevault_database::{DatabasePool, Stores};
use filevault_service::{RequestContext, UserService};

use crate::output::OutputFormat;

/// FileVault: role-based file vault administration
#[derive(Debug, Parser)]
#[command(name = "filevault", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Name of the user to act as
    #[arg(long = "as", value_name = "NAME", global = true)]
    pub actor: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply migrations and seed the bootstrap administrator
    Migrate,
    /// List roles and their permissions
    Roles,
    /// User management
    User(user::UserArgs),
    /// File metadata management
    File(file::FileArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate => migrate::execute(config).await,
            Commands::Roles => roles::execute(config, self.format).await,
            Commands::User(args) => {
                user::execute(args, config, self.format, self.actor.as_deref()).await
            }
            Commands::File(args) => {
                file::execute(args, config, self.format, self.actor.as_deref()).await
            }
        }
    }
}

/// Helper: connect to PostgreSQL
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Helper: connect and build the store set
pub async fn create_stores(config: &AppConfig) -> Result<Stores, AppError> {
    let pool = connect(config).await?;
    Ok(Stores::postgres(pool.pool().clone()))
}

/// Helper: resolve the `--as` user into a request context
pub async fn authenticate(
    users: &UserService,
    actor: Option<&str>,
) -> Result<RequestContext, AppError> {
    let name =
        actor.ok_or_else(|| AppError::validation("This command requires --as <NAME>"))?;
    users.authenticate(name).await
}
