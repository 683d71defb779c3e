//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use smartspace_core::config::StoreProvider;
use smartspace_core::error::AppError;
use smartspace_database::DatabasePool;

use super::Context;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, ctx: &Context<'_>) -> Result<(), AppError> {
    let config = ctx.load_config()?;
    if config.database.provider != StoreProvider::Postgres {
        return Err(AppError::configuration(
            "Migrations require database.provider = \"postgres\"",
        ));
    }

    match &args.command {
        MigrateCommand::Run => {
            let db = DatabasePool::connect(&config.database).await?;
            println!("Running database migrations...");
            let result = smartspace_database::migration::run_migrations(db.pool()).await;
            db.close().await;
            result?;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
