//! Configuration CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;

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
    /// Show the effective configuration
    Show,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Table => {
                println!("Session");
                output::print_kv("Backend", &config.session.backend.to_string());
                output::print_kv("Directory", &config.session.directory);
                output::print_kv("Storage key", &config.session.storage_key);
                output::print_kv("Role groups key", &config.session.role_groups_key);
                println!("Logging");
                output::print_kv("Level", &config.logging.level);
                output::print_kv("Format", &config.logging.format);
                println!("Routes");
                output::print_kv("Count", &config.routes.len().to_string());
            }
            OutputFormat::Json => output::print_json(config),
        },
    }
    Ok(())
}
