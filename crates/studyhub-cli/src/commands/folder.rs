//! Folder CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use studyhub_core::config::AppConfig;
use studyhub_core::error::AppError;
use studyhub_core::types::UserId;
use studyhub_service::{DocumentLocks, FolderService};
use studyhub_storage::LocalStorageProvider;

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List a user's folders with document counts
    List {
        /// Owning user
        #[arg(short, long)]
        user_id: i64,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    folder_id: i64,
    folder_name: String,
    documents: i64,
    created_at: String,
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let storage = Arc::new(LocalStorageProvider::new(&config.storage.root_path).await?);
    let folders = FolderService::new(db.clone(), storage, DocumentLocks::new());

    match &args.command {
        FolderCommand::List { user_id } => {
            let list = folders.list_for_user(UserId::new(*user_id)).await?;

            let rows: Vec<FolderRow> = list
                .folders
                .iter()
                .map(|f| FolderRow {
                    folder_id: f.folder_id.get(),
                    folder_name: f.folder_name.clone(),
                    documents: f.document_count,
                    created_at: f.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!("{} folder(s)", list.total);
            }
        }
    }

    db.close().await;
    Ok(())
}
