//! CLI command definitions and dispatch.

pub mod check;
pub mod config;
pub mod gate;
pub mod role_group;
pub mod route;
pub mod session;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use storefront_auth::AuthStore;
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_core::traits::SessionStorage;

/// Storefront: session and access control for the storefront client
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/storefront.toml")]
    pub config: String,

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
    /// Sign in, register, sign out, or show the session
    Session(session::SessionArgs),
    /// Query the signed-in user's permissions
    Check(check::CheckArgs),
    /// Evaluate a permission gate
    Gate(gate::GateArgs),
    /// Inspect and resolve guarded routes
    Route(route::RouteArgs),
    /// Manage display-only role groups
    RoleGroup(role_group::RoleGroupArgs),
    /// Show the effective configuration
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Session(args) => session::execute(args, &config, self.format).await,
            Commands::Check(args) => check::execute(args, &config, self.format).await,
            Commands::Gate(args) => gate::execute(args, &config, self.format).await,
            Commands::Route(args) => route::execute(args, &config, self.format).await,
            Commands::RoleGroup(args) => role_group::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, self.format),
        }
    }
}

/// Helper: open the configured session storage
pub async fn open_storage(config: &AppConfig) -> Result<Arc<dyn SessionStorage>, AppError> {
    storefront_storage::build_session_storage(&config.session).await
}

/// Helper: open the auth store, restoring any persisted session
pub async fn open_auth_store(config: &AppConfig) -> Result<AuthStore, AppError> {
    let storage = open_storage(config).await?;
    Ok(AuthStore::from_config(storage, &config.session).await)
}
