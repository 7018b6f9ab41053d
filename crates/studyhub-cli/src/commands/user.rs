//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use studyhub_auth::{PasswordHasher, PasswordValidator};
use studyhub_core::config::AppConfig;
use studyhub_core::error::AppError;
use studyhub_database::UserRepository;

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
    /// Create a user
    Create {
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List all users
    List,
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    user_id: i64,
    email: String,
    created_at: String,
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let mut conn = db.acquire().await?;

    match &args.command {
        UserCommand::Create { email, password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            PasswordValidator::default().validate(&password)?;
            let password_hash = PasswordHasher::new().hash_password(&password)?;

            let user = UserRepository
                .create(&mut conn, email.trim(), &password_hash)
                .await?;

            output::print_success(&format!(
                "User '{}' created (id: {})",
                user.email, user.user_id
            ));
        }
        UserCommand::List => {
            let users = UserRepository.list(&mut conn).await?;

            let rows: Vec<UserRow> = users
                .iter()
                .map(|u| UserRow {
                    user_id: u.user_id.get(),
                    email: u.email.clone(),
                    created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
    }

    drop(conn);
    db.close().await;
    Ok(())
}
