//! Permission query CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;

/// Arguments for check commands
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Check subcommand
    #[command(subcommand)]
    pub command: CheckCommand,
}

/// Check subcommands
#[derive(Debug, Subcommand)]
pub enum CheckCommand {
    /// Whether a single permission is granted
    Has {
        /// Permission or role name
        name: String,
    },
    /// Whether any of the permissions is granted
    Any {
        /// Permission or role names
        names: Vec<String>,
    },
    /// Whether all of the permissions are granted
    All {
        /// Permission or role names
        names: Vec<String>,
    },
    /// List the signed-in user's permissions
    List,
}

/// Result of a permission query
#[derive(Debug, Serialize)]
struct CheckResult {
    query: &'static str,
    names: Vec<String>,
    granted: bool,
}

/// Permission display row
#[derive(Debug, Serialize, Tabled)]
struct PermissionRow {
    /// As granted
    permission: String,
    /// Canonical form
    canonical: String,
}

/// Execute check commands
pub async fn execute(
    args: &CheckArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::open_auth_store(config).await?;
    let evaluator = store.evaluator();

    let result = match &args.command {
        CheckCommand::Has { name } => CheckResult {
            query: "has",
            names: vec![name.clone()],
            granted: evaluator.has_permission(name),
        },
        CheckCommand::Any { names } => CheckResult {
            query: "any",
            names: names.clone(),
            granted: evaluator.has_any_permission(names.as_slice()),
        },
        CheckCommand::All { names } => CheckResult {
            query: "all",
            names: names.clone(),
            granted: evaluator.has_all_permissions(names.as_slice()),
        },
        CheckCommand::List => {
            let rows: Vec<PermissionRow> = evaluator
                .user_permissions()
                .into_iter()
                .map(|permission| PermissionRow {
                    canonical: storefront_auth::canonicalize(&permission).to_string(),
                    permission,
                })
                .collect();
            output::print_list(&rows, format);
            return Ok(());
        }
    };

    match format {
        OutputFormat::Table => {
            if !evaluator.is_authenticated() {
                output::print_warning("Not signed in; every permission check is denied");
            }
            output::print_kv("Query", result.query);
            output::print_kv("Names", &result.names.join(", "));
            output::print_kv("Granted", if result.granted { "yes" } else { "no" });
        }
        OutputFormat::Json => output::print_json(&result),
    }
    Ok(())
}
