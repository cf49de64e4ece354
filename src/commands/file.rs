//! File metadata CLI commands. Every command acts on behalf of `--as`.

use chrono::{DateTime, Utc};
use clap::{ArgAction, Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use filevault_auth::FileFilterParams;
use filevault_core::config::AppConfig;
use filevault_core::error::AppError;
use filevault_core::types::FileId;
use filevault_entity::file::FileMetadata;
use filevault_service::{FileService, UpdateFileRequest, UserService};

use crate::output::{self, OutputFormat};

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// Record metadata for an uploaded file
    Register {
        /// Full file name, extension included
        name: String,
        /// Size in bytes
        #[arg(long)]
        size: u64,
        /// Free-form comment
        #[arg(long)]
        comment: Option<String>,
    },
    /// List readable files matching every given criterion
    List {
        /// Case-insensitive name substring
        #[arg(long)]
        name: Option<String>,
        /// Extension, repeatable
        #[arg(long = "ext")]
        extensions: Vec<String>,
        /// Uploaded at or after (RFC 3339)
        #[arg(long)]
        uploaded_from: Option<DateTime<Utc>>,
        /// Uploaded at or before (RFC 3339)
        #[arg(long)]
        uploaded_to: Option<DateTime<Utc>>,
        /// Modified at or after (RFC 3339)
        #[arg(long)]
        modified_from: Option<DateTime<Utc>>,
        /// Modified at or before (RFC 3339)
        #[arg(long)]
        modified_to: Option<DateTime<Utc>>,
    },
    /// Show one file
    Get {
        /// File id
        id: FileId,
    },
    /// Make a file public or private
    SetVisibility {
        /// File id
        id: FileId,
        /// Whether the file is public
        #[arg(long, action = ArgAction::Set)]
        public: bool,
    },
    /// Delete a file
    Delete {
        /// File id
        id: FileId,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// File display row for table output
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// File id
    id: String,
    /// Full name
    name: String,
    /// Owner id
    owner_id: String,
    /// Public flag
    public: bool,
    /// Size in bytes
    size: i64,
    /// Uploaded at
    uploaded_at: String,
    /// Modified at
    modified_at: String,
}

impl From<&FileMetadata> for FileRow {
    fn from(f: &FileMetadata) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.full_name(),
            owner_id: f.owner_id.to_string(),
            public: f.is_public,
            size: f.size_bytes,
            uploaded_at: f.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
            modified_at: f.modified_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute file commands
pub async fn execute(
    args: &FileArgs,
    config: &AppConfig,
    format: OutputFormat,
    actor: Option<&str>,
) -> Result<(), AppError> {
    let stores = super::create_stores(config).await?;
    let users = UserService::from_stores(&stores);
    let files = FileService::from_stores(&stores, config.vault.clone());
    let ctx = super::authenticate(&users, actor).await?;

    match &args.command {
        FileCommand::Register {
            name,
            size,
            comment,
        } => {
            let file = files.register(&ctx, name, comment.clone(), *size).await?;
            output::print_success(&format!("File '{}' registered as {}", file.full_name(), file.id));
        }
        FileCommand::List {
            name,
            extensions,
            uploaded_from,
            uploaded_to,
            modified_from,
            modified_to,
        } => {
            let params = FileFilterParams {
                name: name.clone(),
                upload_date_from: *uploaded_from,
                upload_date_to: *uploaded_to,
                modified_date_from: *modified_from,
                modified_date_to: *modified_to,
                extensions: extensions.clone(),
            };
            let found = files.list(&ctx, &params).await?;
            let rows: Vec<FileRow> = found.iter().map(FileRow::from).collect();
            format.print_list(&rows);
        }
        FileCommand::Get { id } => {
            let file = files.get(&ctx, *id).await?;
            format.print_item(&FileRow::from(&file));
        }
        FileCommand::SetVisibility { id, public } => {
            let req = UpdateFileRequest {
                is_public: Some(*public),
                ..Default::default()
            };
            let file = files.update(&ctx, *id, req).await?;
            let visibility = if file.is_public { "public" } else { "private" };
            output::print_success(&format!("File '{}' is now {visibility}", file.full_name()));
        }
        FileCommand::Delete { id, force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Delete file {id}?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let file = files.delete(&ctx, *id).await?;
            output::print_success(&format!("File '{}' deleted", file.full_name()));
        }
    }

    Ok(())
}
