//! Smartspace Server — federated action service
//!
//! Main entry point: loads configuration, initializes logging, and hands
//! over to the API crate's server bootstrap.

use tracing_subscriber::{EnvFilter, fmt};

use smartspace_core::config::AppConfig;
use smartspace_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = smartspace_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file, environment overlay, and `SMARTSPACE__*` variables
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("SMARTSPACE_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("SMARTSPACE_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_from(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }

    tracing::info!(
        smartspace = %config.smartspace.name,
        format = %config.logging.format,
        "Logging initialized"
    );
}
