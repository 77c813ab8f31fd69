//! Tool catalog: the fixed set of operations the router may select from.
//!
//! A catalog is built once at startup and shared read-only afterwards.
//! Construction rejects duplicate tool names and malformed parameter lists,
//! so every catalog that exists is internally consistent.

mod loader;
mod seed;

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};

/// Primitive type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Integer,
    Number,
    String,
    Boolean,
}

impl ParamKind {
    /// JSON Schema type name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Integer => "integer",
            ParamKind::Number => "number",
            ParamKind::String => "string",
            ParamKind::Boolean => "boolean",
        }
    }
}

impl std::str::FromStr for ParamKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "integer" | "int" => Ok(ParamKind::Integer),
            "number" | "float" => Ok(ParamKind::Number),
            "string" => Ok(ParamKind::String),
            "boolean" | "bool" => Ok(ParamKind::Boolean),
            _ => Err(format!("Unknown parameter kind: {}", s)),
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named parameter of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

/// One selectable operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Unique catalog key.
    pub name: String,
    /// Hint for the reasoning service. Never parsed.
    #[serde(default)]
    pub description: String,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParamSpec>,
}

impl ToolSpec {
    /// Create a tool with no parameters.
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn with_param(mut self, name: &str, kind: ParamKind, description: &str, required: bool) -> Self {
        self.parameters.push(ParamSpec {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required,
        });
        self
    }

    /// Find a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParamSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Parameters the caller must always supply.
    pub fn required(&self) -> impl Iterator<Item = &ParamSpec> {
        self.parameters.iter().filter(|p| p.required)
    }

    /// Render the parameter list as a JSON Schema object.
    pub fn parameters_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.parameters {
            properties.insert(
                param.name.clone(),
                json!({
                    "type": param.kind.as_str(),
                    "description": param.description,
                }),
            );
        }
        let required: Vec<&str> = self.required().map(|p| p.name.as_str()).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Build a tool from a JSON Schema parameter block of the form
    /// `{"type": "object", "properties": {...}, "required": [...]}`.
    pub fn from_function_schema(
        name: &str,
        description: &str,
        schema: &Value,
    ) -> std::result::Result<Self, CatalogError> {
        let invalid = |reason: &str| CatalogError::InvalidSchema {
            tool: name.to_string(),
            reason: reason.to_string(),
        };

        let object = schema
            .as_object()
            .ok_or_else(|| invalid("parameters must be a JSON object"))?;

        if let Some(ty) = object.get("type") {
            if ty.as_str() != Some("object") {
                return Err(invalid("parameters type must be \"object\""));
            }
        }

        let required: Vec<&str> = match object.get("required") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| v.as_str().ok_or_else(|| invalid("required entries must be strings")))
                .collect::<std::result::Result<_, _>>()?,
            Some(_) => return Err(invalid("required must be an array")),
        };

        let properties = match object.get("properties") {
            None => Map::new(),
            Some(Value::Object(props)) => props.clone(),
            Some(_) => return Err(invalid("properties must be an object")),
        };

        let mut spec = ToolSpec::new(name, description);
        for (param_name, property) in &properties {
            let kind_name = property
                .get("type")
                .and_then(Value::as_str)
                .ok_or_else(|| invalid(&format!("property '{}' has no type", param_name)))?;
            let kind: ParamKind = kind_name.parse().map_err(|_| CatalogError::UnsupportedKind {
                tool: name.to_string(),
                parameter: param_name.clone(),
                kind: kind_name.to_string(),
            })?;
            let param_description = property
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default();

            spec = spec.with_param(
                param_name,
                kind,
                param_description,
                required.contains(&param_name.as_str()),
            );
        }

        if let Some(missing) = required.iter().find(|r| !properties.contains_key(**r)) {
            return Err(CatalogError::UndeclaredRequired {
                tool: name.to_string(),
                parameter: missing.to_string(),
            });
        }

        Ok(spec)
    }

    fn check(&self) -> std::result::Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidSchema {
                tool: self.name.clone(),
                reason: "tool name is empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for param in &self.parameters {
            if !seen.insert(param.name.as_str()) {
                return Err(CatalogError::DuplicateParameter {
                    tool: self.name.clone(),
                    parameter: param.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Immutable, ordered registry of tool specs.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolSpec>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    /// Build a catalog, failing on the first inconsistent tool.
    pub fn new(tools: Vec<ToolSpec>) -> std::result::Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(tools.len());
        for (position, tool) in tools.iter().enumerate() {
            tool.check()?;
            if index.insert(tool.name.clone(), position).is_some() {
                return Err(CatalogError::DuplicateTool(tool.name.clone()));
            }
        }
        Ok(Self { tools, index })
    }

    /// The built-in catalog of office operations.
    pub fn seed() -> Self {
        seed::catalog()
    }

    /// Find a tool by name.
    pub fn lookup(&self, name: &str) -> Option<&ToolSpec> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// All tools in declaration order.
    pub fn all(&self) -> &[ToolSpec] {
        &self.tools
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_tool_name_rejected() {
        let tools = vec![
            ToolSpec::new("get_ticket_status", "first"),
            ToolSpec::new("get_ticket_status", "second"),
        ];
        let err = ToolCatalog::new(tools).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateTool("get_ticket_status".to_string()));
    }

    #[test]
    fn test_duplicate_parameter_rejected() {
        let tool = ToolSpec::new("report_office_issue", "")
            .with_param("department", ParamKind::String, "", true)
            .with_param("department", ParamKind::String, "", false);
        let err = ToolCatalog::new(vec![tool]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateParameter { ref parameter, .. } if parameter == "department"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = ToolCatalog::new(vec![ToolSpec::new("  ", "blank")]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidSchema { .. }));
    }

    #[test]
    fn test_lookup_and_order() {
        let catalog = ToolCatalog::new(vec![
            ToolSpec::new("b", ""),
            ToolSpec::new("a", ""),
        ])
        .unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(catalog.lookup("a").map(|t| t.name.as_str()), Some("a"));
        assert!(catalog.lookup("c").is_none());
    }

    #[test]
    fn test_from_function_schema() {
        let schema = json!({
            "type": "object",
            "properties": {
                "employee_id": {"type": "integer", "description": "The employee ID number"},
                "current_year": {"type": "integer", "description": "The year for bonus calculation"}
            },
            "required": ["employee_id", "current_year"]
        });
        let spec = ToolSpec::from_function_schema("calculate_performance_bonus", "bonus", &schema).unwrap();
        assert_eq!(spec.parameters.len(), 2);
        assert_eq!(spec.parameters[0].name, "employee_id");
        assert!(spec.parameters.iter().all(|p| p.required && p.kind == ParamKind::Integer));
    }

    #[test]
    fn test_from_function_schema_undeclared_required() {
        let schema = json!({
            "type": "object",
            "properties": {"date": {"type": "string"}},
            "required": ["date", "meeting_room"]
        });
        let err = ToolSpec::from_function_schema("schedule_meeting", "", &schema).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UndeclaredRequired {
                tool: "schedule_meeting".to_string(),
                parameter: "meeting_room".to_string(),
            }
        );
    }

    #[test]
    fn test_from_function_schema_unsupported_kind() {
        let schema = json!({
            "type": "object",
            "properties": {"tags": {"type": "array"}}
        });
        let err = ToolSpec::from_function_schema("tag", "", &schema).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedKind { ref kind, .. } if kind == "array"));
    }

    #[test]
    fn test_parameters_schema_shape() {
        let spec = ToolSpec::new("get_ticket_status", "Get the status of an IT support ticket")
            .with_param("ticket_id", ParamKind::Integer, "The ticket ID number", true);
        assert_eq!(
            spec.parameters_schema(),
            json!({
                "type": "object",
                "properties": {
                    "ticket_id": {"type": "integer", "description": "The ticket ID number"}
                },
                "required": ["ticket_id"]
            })
        );
    }
}
