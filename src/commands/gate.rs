//! Permission gate CLI command.

use std::str::FromStr;

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use storefront_auth::{Decision, MatchMode, PermissionGate};
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;

/// Arguments for the gate command
#[derive(Debug, Args)]
pub struct GateArgs {
    /// Required permission (repeatable)
    #[arg(short, long = "require")]
    pub require: Vec<String>,

    /// How required permissions combine
    #[arg(short, long, value_parser = MatchMode::from_str, default_value = "any")]
    pub mode: MatchMode,

    /// Content shown when allowed
    #[arg(long, default_value = "granted")]
    pub content: String,

    /// Content shown when denied (nothing if omitted)
    #[arg(long)]
    pub denied: Option<String>,
}

/// Gate evaluation result
#[derive(Debug, Serialize)]
struct GateResult<'a> {
    gate: &'a PermissionGate,
    decision: Decision,
    rendered: Option<String>,
}

/// Execute the gate command
pub async fn execute(
    args: &GateArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::open_auth_store(config).await?;
    let evaluator = store.evaluator();

    let gate = PermissionGate::new(args.require.iter().cloned()).with_mode(args.mode);
    let decision = gate.evaluate(&evaluator);
    let rendered = gate.select(&evaluator, args.content.clone(), args.denied.clone());

    match format {
        OutputFormat::Table => {
            output::print_kv("Decision", &decision.to_string());
            if let Some(content) = &rendered {
                println!("{}", content);
            }
        }
        OutputFormat::Json => output::print_json(&GateResult {
            gate: &gate,
            decision,
            rendered,
        }),
    }
    Ok(())
}
