//! Start the Smartspace server.

use clap::Args;

use crate::output;
use smartspace_core::config::StoreProvider;
use smartspace_core::error::AppError;

use super::Context;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Use in-memory stores regardless of configuration
    #[arg(long)]
    pub memory: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, ctx: &Context<'_>) -> Result<(), AppError> {
    let mut config = ctx.load_config()?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.memory {
        config.database.provider = StoreProvider::Memory;
    }

    println!("Starting Smartspace server...");
    output::print_kv("Smartspace", &config.smartspace.name);
    output::print_kv("Host", &config.server.host);
    output::print_kv("Port", &config.server.port.to_string());

    if config.database.provider == StoreProvider::Memory {
        output::print_warning("Using in-memory stores; data is lost on shutdown.");
    }

    smartspace_api::run_server(config).await
}
