//! CLI command definitions and dispatch.

pub mod actions;
pub mod config;
pub mod elements;
pub mod migrate;
pub mod serve;
pub mod users;

use std::future::Future;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;
use smartspace_api::AppState;
use smartspace_core::config::AppConfig;
use smartspace_core::error::AppError;
use smartspace_core::types::pagination::{DEFAULT_PAGE_SIZE, PageRequest};
use smartspace_database::Stores;

/// Smartspace — federated action service
#[derive(Debug, Parser)]
#[command(name = "smartspace", version, about, long_about = None)]
pub struct Cli {
    /// Path to the base configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay loaded next to the base file
    #[arg(short, long, env = "SMARTSPACE_ENV", default_value = "development")]
    pub env: String,

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
    /// Start the Smartspace server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Action listing, import, and deletion
    Actions(actions::ActionArgs),
    /// User management
    Users(users::UserArgs),
    /// Element management
    Elements(elements::ElementArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let ctx = Context {
            config_path: &self.config,
            env: &self.env,
        };

        match &self.command {
            Commands::Serve(args) => serve::execute(args, &ctx).await,
            Commands::Migrate(args) => migrate::execute(args, &ctx).await,
            Commands::Actions(args) => actions::execute(args, &ctx, self.format).await,
            Commands::Users(args) => users::execute(args, &ctx, self.format).await,
            Commands::Elements(args) => elements::execute(args, &ctx, self.format).await,
            Commands::Config(args) => config::execute(args, &ctx, self.format).await,
        }
    }
}

/// Where the configuration comes from.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Base configuration file
    pub config_path: &'a str,
    /// Environment overlay name
    pub env: &'a str,
}

impl Context<'_> {
    /// Load and validate the configuration.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from(self.config_path, self.env)
    }

    /// Connect the configured stores and build the services over them.
    pub async fn connect(&self) -> Result<AppState, AppError> {
        let config = self.load_config()?;
        smartspace_api::build_state(config).await
    }
}

/// Run `work`, then close `stores` whether or not it succeeded.
pub async fn close_after<T>(
    stores: &Stores,
    work: impl Future<Output = Result<T, AppError>>,
) -> Result<T, AppError> {
    let result = work.await;
    stores.close().await;
    result
}

/// Paging flags shared by listing commands
#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// Zero-based page number
    #[arg(long, default_value_t = 0)]
    pub page: u32,

    /// Page size
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub size: u32,
}

impl From<PageArgs> for PageRequest {
    fn from(args: PageArgs) -> Self {
        PageRequest::new(args.page, args.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartspace_database::DatabasePool;
    use sqlx::postgres::PgPoolOptions;

    fn lazy_pool() -> sqlx::PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://smartspace@localhost:5432/smartspace")
            .unwrap()
    }

    #[tokio::test]
    async fn test_close_after_closes_pool_on_error() {
        let pool = lazy_pool();
        let stores = Stores::postgres(DatabasePool::from(pool.clone()));

        let result: Result<(), AppError> =
            close_after(&stores, async { Err(AppError::not_found("no such action")) }).await;

        assert!(result.is_err());
        assert!(pool.is_closed());
    }

    #[tokio::test]
    async fn test_close_after_closes_pool_on_success() {
        let pool = lazy_pool();
        let stores = Stores::postgres(DatabasePool::from(pool.clone()));

        let value = close_after(&stores, async { Ok(7) }).await.unwrap();

        assert_eq!(value, 7);
        assert!(pool.is_closed());
    }

    #[test]
    fn test_page_args_into_page_request() {
        let page: PageRequest = PageArgs { page: 2, size: 5 }.into();
        assert_eq!(page, PageRequest::new(2, 5));
    }
}
