//! Action management CLI commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use smartspace_core::error::AppError;
use smartspace_core::types::key::{ActionKey, UserKey};
use smartspace_entity::action::ActionEntity;

use super::{Context, PageArgs, close_after};

/// Arguments for action commands
#[derive(Debug, Args)]
pub struct ActionArgs {
    /// Action subcommand
    #[command(subcommand)]
    pub command: ActionCommand,
}

/// Action subcommands
#[derive(Debug, Subcommand)]
pub enum ActionCommand {
    /// List every action ordered by key (admin only)
    List {
        /// Admin email
        #[arg(long)]
        admin: String,
        /// Admin smartspace; defaults to the local one
        #[arg(long)]
        smartspace: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Import actions from another smartspace (admin only)
    Import {
        /// JSON file holding an array of actions
        file: PathBuf,
        /// Admin email
        #[arg(long)]
        admin: String,
        /// Admin smartspace; defaults to the local one
        #[arg(long)]
        smartspace: Option<String>,
    },
    /// Delete an action by key (`id#smartspace`)
    Delete {
        /// Action key
        key: String,
    },
}

/// Action display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ActionRow {
    /// Action key
    key: String,
    /// Action type
    #[tabled(rename = "type")]
    action_type: String,
    /// Player key
    player: String,
    /// Element key
    element: String,
    /// Creation timestamp
    created_at: String,
}

impl From<&ActionEntity> for ActionRow {
    fn from(action: &ActionEntity) -> Self {
        Self {
            key: action.key().to_string(),
            action_type: action.action_type.clone(),
            player: action.player_key().to_string(),
            element: action.element_key().to_string(),
            created_at: action.creation_timestamp.to_rfc3339(),
        }
    }
}

/// Execute action commands
pub async fn execute(
    args: &ActionArgs,
    ctx: &Context<'_>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = ctx.connect().await?;
    let service = &state.action_service;

    close_after(&state.stores, async {
        match &args.command {
            ActionCommand::List {
                admin,
                smartspace,
                page,
            } => {
                let smartspace = smartspace.as_deref().unwrap_or(state.local_smartspace());
                let key = UserKey::new(admin, smartspace).to_string();
                let actions = service
                    .get_action_using_pagination(&key, (*page).into())
                    .await?;

                let rows: Vec<ActionRow> = actions.iter().map(ActionRow::from).collect();
                output::print_list(&rows, format);
            }
            ActionCommand::Import {
                file,
                admin,
                smartspace,
            } => {
                let raw = tokio::fs::read_to_string(file).await.map_err(|e| {
                    AppError::with_source(
                        smartspace_core::error::ErrorKind::Internal,
                        format!("Failed to read '{}'", file.display()),
                        e,
                    )
                })?;
                let actions: Vec<ActionEntity> = serde_json::from_str(&raw)?;

                let smartspace = smartspace.as_deref().unwrap_or(state.local_smartspace());
                let imported = service.store(smartspace, admin, actions).await?;

                output::print_success(&format!(
                    "Imported {} action(s) from '{}'",
                    imported.len(),
                    file.display()
                ));
                let rows: Vec<ActionRow> = imported.iter().map(ActionRow::from).collect();
                output::print_list(&rows, format);
            }
            ActionCommand::Delete { key } => {
                let key: ActionKey = key.parse()?;
                service.delete_by_key(&key).await?;
                output::print_success(&format!("Action '{}' deleted", key));
            }
        }
        Ok::<_, AppError>(())
    })
    .await
}
