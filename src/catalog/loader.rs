//! Loading catalogs from files.
//!
//! Two formats are accepted:
//! - `.json`: an array of OpenAI-style function tools
//!   (`{"type": "function", "function": {"name", "description", "parameters"}}`)
//! - anything else: TOML with a `[[tools]]` table per operation

use super::{ToolCatalog, ToolSpec};
use crate::error::{Result, SwitchyardError};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, instrument};

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tools: Vec<ToolSpec>,
}

#[derive(Deserialize)]
struct FunctionTool {
    #[serde(rename = "type", default = "default_tool_type")]
    tool_type: String,
    function: FunctionDefinition,
}

#[derive(Deserialize)]
struct FunctionDefinition {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    parameters: Option<Value>,
}

fn default_tool_type() -> String {
    "function".to_string()
}

impl ToolCatalog {
    /// Load a catalog from a file, choosing the format by extension.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let catalog = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        debug!("Loaded {} tools from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse a TOML catalog with one `[[tools]]` entry per operation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Ok(Self::new(file.tools)?)
    }

    /// Parse an array of OpenAI-style function tools.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let tools: Vec<FunctionTool> = serde_json::from_str(content)?;

        let specs = tools
            .iter()
            .map(|tool| {
                if tool.tool_type != "function" {
                    return Err(SwitchyardError::Config(format!(
                        "Unsupported tool type '{}' for '{}'",
                        tool.tool_type, tool.function.name
                    )));
                }
                let empty = serde_json::json!({ "type": "object", "properties": {} });
                let schema = tool.function.parameters.as_ref().unwrap_or(&empty);
                Ok(ToolSpec::from_function_schema(
                    &tool.function.name,
                    &tool.function.description,
                    schema,
                )?)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(specs)?)
    }
}
