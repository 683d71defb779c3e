//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use smartspace_core::error::AppError;
use smartspace_entity::user::{UserEntity, UserRole};

use super::{Context, PageArgs, close_after};

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
    /// Register a user in the local smartspace
    Add {
        /// Email
        email: String,
        /// Display name
        #[arg(short, long)]
        username: String,
        /// Role: admin, manager, or player
        #[arg(short, long, default_value = "player")]
        role: String,
        /// Avatar URL or emoji
        #[arg(long, default_value = "")]
        avatar: String,
    },
    /// List users ordered by key
    List {
        #[command(flatten)]
        page: PageArgs,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User key
    key: String,
    /// Username
    username: String,
    /// Role
    role: String,
    /// Points
    points: i64,
}

impl From<&UserEntity> for UserRow {
    fn from(user: &UserEntity) -> Self {
        Self {
            key: user.key().to_string(),
            username: user.username.clone(),
            role: user.role.to_string(),
            points: user.points,
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    ctx: &Context<'_>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = ctx.connect().await?;

    close_after(&state.stores, async {
        match &args.command {
            UserCommand::Add {
                email,
                username,
                role,
                avatar,
            } => {
                let role: UserRole = role.parse()?;
                let mut user = UserEntity::new(
                    email.as_str(),
                    state.local_smartspace(),
                    username.as_str(),
                    role,
                );
                user.avatar = avatar.clone();

                let created = state.user_service.create_user(user).await?;
                output::print_success(&format!("User '{}' created", created.key()));
                output::print_item(&created, format);
            }
            UserCommand::List { page } => {
                let users = state.user_service.list_users((*page).into()).await?;
                let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
                output::print_list(&rows, format);
            }
        }
        Ok::<_, AppError>(())
    })
    .await
}
