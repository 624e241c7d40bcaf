//! Route table CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use storefront_auth::{RouteOutcome, RouteTable};
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;

/// Arguments for route commands
#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Route subcommand
    #[command(subcommand)]
    pub command: RouteCommand,
}

/// Route subcommands
#[derive(Debug, Subcommand)]
pub enum RouteCommand {
    /// List configured routes
    List,
    /// Resolve navigation to a path for the signed-in user
    Resolve {
        /// Path to navigate to
        path: String,
    },
}

/// Route display row
#[derive(Debug, Serialize, Tabled)]
struct RouteRow {
    /// Path
    path: String,
    /// Required roles
    roles: String,
    /// Fallback
    fallback: String,
}

/// Navigation result
#[derive(Debug, Serialize)]
struct ResolveResult<'a> {
    path: &'a str,
    matched: Option<&'a str>,
    #[serde(flatten)]
    outcome: RouteOutcome,
}

/// Execute route commands
pub async fn execute(
    args: &RouteArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let table = RouteTable::from_config(&config.routes)?;

    match &args.command {
        RouteCommand::List => {
            let rows: Vec<RouteRow> = table
                .entries()
                .iter()
                .map(|entry| match entry.guard() {
                    Some(guard) => RouteRow {
                        path: entry.path().to_string(),
                        roles: guard.required_roles().join(", "),
                        fallback: guard.fallback().to_string(),
                    },
                    None => RouteRow {
                        path: entry.path().to_string(),
                        roles: "(public)".to_string(),
                        fallback: "-".to_string(),
                    },
                })
                .collect();
            output::print_list(&rows, format);
        }
        RouteCommand::Resolve { path } => {
            let store = super::open_auth_store(config).await?;
            let evaluator = store.evaluator();
            let outcome = table.navigate(path, &evaluator);
            let matched = table.find(path).map(|entry| entry.path());

            match format {
                OutputFormat::Table => {
                    output::print_kv("Path", path);
                    output::print_kv("Matched route", matched.unwrap_or("-"));
                    let shown = match &outcome {
                        RouteOutcome::Render => "render".to_string(),
                        RouteOutcome::Fallback(fallback) => fallback.to_string(),
                        RouteOutcome::NotFound => "not found".to_string(),
                    };
                    output::print_kv("Outcome", &shown);
                }
                OutputFormat::Json => output::print_json(&ResolveResult {
                    path,
                    matched,
                    outcome,
                }),
            }
        }
    }
    Ok(())
}
