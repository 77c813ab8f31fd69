//! Route command implementation.

use super::build_router;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the route command: one query, one validated call printed as JSON.
pub async fn run_route(query: &str, model: Option<String>, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Route, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'switchyard doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let router = build_router(&settings, model.as_deref())?;

    let spinner = Output::spinner("Routing query...");

    match router.route(query).await {
        Ok(call) => {
            spinner.finish_and_clear();
            println!("{}", serde_json::to_string_pretty(&call)?);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("{} ({})", e, e.kind()));
            return Err(e.into());
        }
    }

    Ok(())
}
