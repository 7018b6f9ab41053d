//! CLI command definitions and dispatch.

pub mod folder;
pub mod migrate;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use studyhub_core::config::AppConfig;
use studyhub_core::error::AppError;
use studyhub_database::DatabasePool;

/// StudyHub: PDF document and folder backend
#[derive(Debug, Parser)]
#[command(name = "studyhub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to load (`config/{env}.toml`); defaults to `STUDYHUB_ENV`
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Folder management
    Folder(folder::FolderArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let env = self.env.clone().unwrap_or_else(AppConfig::environment);
        let config = AppConfig::load(&env)?;

        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Folder(args) => folder::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: connect to the configured database
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_create() {
        let cli = Cli::try_parse_from([
            "studyhub",
            "--format",
            "json",
            "user",
            "create",
            "--email",
            "a@b.c",
        ])
        .expect("parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::User(user::UserArgs {
                command: user::UserCommand::Create { .. }
            })
        ));
    }

    #[test]
    fn test_parse_folder_list() {
        let cli = Cli::try_parse_from(["studyhub", "folder", "list", "--user-id", "3"])
            .expect("parse");
        match cli.command {
            Commands::Folder(folder::FolderArgs {
                command: folder::FolderCommand::List { user_id },
            }) => assert_eq!(user_id, 3),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_folder_list_requires_user() {
        assert!(Cli::try_parse_from(["studyhub", "folder", "list"]).is_err());
    }
}
