//! Tools command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the tools command.
pub fn run_tools(settings: &Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Tools, settings) {
        Output::error(&format!("Failed to load catalog: {}", e));
        return Err(e.into());
    }

    let catalog = settings.load_catalog()?;

    let source = match settings.catalog_path() {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    };

    Output::header(&format!("Tool Catalog ({})", catalog.len()));
    Output::kv("Source", &source);
    println!();

    for tool in catalog.all() {
        Output::tool_info(tool);
    }

    let parameters: usize = catalog.all().iter().map(|t| t.parameters.len()).sum();
    println!();
    Output::kv("Total tools", &catalog.len().to_string());
    Output::kv("Total parameters", &parameters.to_string());

    Ok(())
}
