//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use smartspace_core::config::StoreProvider;
use smartspace_core::error::AppError;

use super::Context;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    ctx: &Context<'_>,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut config = ctx.load_config()?;
            config.database.url = mask_password(&config.database.url);
            output::print_item(&config, format);
        }
        ConfigCommand::Validate => match ctx.load_config() {
            Ok(config) => {
                output::print_success(&format!(
                    "Configuration '{}' ({}) is valid",
                    ctx.config_path, ctx.env
                ));
                output::print_kv("Smartspace", &config.smartspace.name);
                output::print_kv(
                    "Server",
                    &format!("{}:{}", config.server.host, config.server.port),
                );
                match config.database.provider {
                    StoreProvider::Postgres => {
                        output::print_kv("Database", &mask_password(&config.database.url))
                    }
                    StoreProvider::Memory => output::print_kv("Database", "in-memory"),
                }
                let plugins = if config.plugins.enabled.is_empty() {
                    "all built-in".to_string()
                } else {
                    config.plugins.enabled.join(", ")
                };
                output::print_kv("Plugins", &plugins);
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}

/// Mask password in database URL for display
fn mask_password(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url[..at_pos].rfind(':') {
        Some(colon_pos) if colon_pos >= scheme_end => {
            format!("{}****{}", &url[..=colon_pos], &url[at_pos..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_password() {
        assert_eq!(
            mask_password("postgres://smart:secret@db:5432/smartspace"),
            "postgres://smart:****@db:5432/smartspace"
        );
        assert_eq!(
            mask_password("postgres://db:5432/smartspace"),
            "postgres://db:5432/smartspace"
        );
        assert_eq!(mask_password(""), "");
    }
}
