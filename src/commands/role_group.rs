//! Role group CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use storefront_auth::RoleGroupStore;
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_core::types::RoleGroupId;

/// Arguments for role group commands
#[derive(Debug, Args)]
pub struct RoleGroupArgs {
    /// Role group subcommand
    #[command(subcommand)]
    pub command: RoleGroupCommand,
}

/// Role group subcommands
#[derive(Debug, Subcommand)]
pub enum RoleGroupCommand {
    /// List role groups
    List,
    /// Add a role group
    Add {
        /// Group name
        name: String,
    },
    /// Rename a role group
    Rename {
        /// Group ID
        id: String,
        /// New name
        name: String,
    },
    /// Remove a role group
    Remove {
        /// Group ID
        id: String,
    },
}

/// Role group display row
#[derive(Debug, Serialize, Tabled)]
struct RoleGroupRow {
    /// Group ID
    id: String,
    /// Name
    name: String,
}

/// Execute role group commands
pub async fn execute(
    args: &RoleGroupArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let storage = super::open_storage(config).await?;
    let store = RoleGroupStore::load(storage, config.session.role_groups_key.clone()).await;

    match &args.command {
        RoleGroupCommand::List => {
            let rows: Vec<RoleGroupRow> = store
                .list()
                .await
                .into_iter()
                .map(|group| RoleGroupRow {
                    id: group.id.to_string(),
                    name: group.name,
                })
                .collect();
            output::print_list(&rows, format);
        }
        RoleGroupCommand::Add { name } => {
            let group = store.add(name).await?;
            output::print_success(&format!("Added role group {} ({})", group.name, group.id));
        }
        RoleGroupCommand::Rename { id, name } => {
            let group = store.rename(parse_id(id)?, name).await?;
            output::print_success(&format!("Renamed role group {} to {}", group.id, group.name));
        }
        RoleGroupCommand::Remove { id } => {
            let group = store.remove(parse_id(id)?).await?;
            output::print_success(&format!("Removed role group {}", group.name));
        }
    }
    Ok(())
}

fn parse_id(id: &str) -> Result<RoleGroupId, AppError> {
    id.parse()
        .map_err(|e| AppError::validation(format!("Invalid role group ID: {}", e)))
}
