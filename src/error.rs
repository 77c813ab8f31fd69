//! Error types for Switchyard.

use crate::catalog::ParamKind;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Startup-level error type: configuration, catalog loading and IO.
#[derive(Error, Debug)]
pub enum SwitchyardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for startup operations.
pub type Result<T> = std::result::Result<T, SwitchyardError>;

/// Reasons a tool catalog refuses to be built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("duplicate tool name: {0}")]
    DuplicateTool(String),

    #[error("tool '{tool}' declares parameter '{parameter}' more than once")]
    DuplicateParameter { tool: String, parameter: String },

    #[error("tool '{tool}' requires parameter '{parameter}' which it does not declare")]
    UndeclaredRequired { tool: String, parameter: String },

    #[error("tool '{tool}' parameter '{parameter}' has unsupported kind '{kind}'")]
    UnsupportedKind {
        tool: String,
        parameter: String,
        kind: String,
    },

    #[error("tool '{tool}' has an invalid schema: {reason}")]
    InvalidSchema { tool: String, reason: String },
}

/// Per-request routing failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouterError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Gateway failure: {0}")]
    GatewayFailure(String),

    #[error("Gateway timed out after {}s", .0.as_secs_f64())]
    GatewayTimeout(Duration),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    #[error("Type mismatch for argument '{parameter}': expected {expected}, got {actual}")]
    TypeMismatch {
        parameter: String,
        expected: ParamKind,
        actual: serde_json::Value,
    },
}

/// Externally visible failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    GatewayFailure,
    UnknownOperation,
    MissingArgument,
    UnknownArgument,
    TypeMismatch,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::GatewayFailure => "gateway_failure",
            ErrorKind::UnknownOperation => "unknown_operation",
            ErrorKind::MissingArgument => "missing_argument",
            ErrorKind::UnknownArgument => "unknown_argument",
            ErrorKind::TypeMismatch => "type_mismatch",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RouterError {
    /// Category of this failure. Timeouts are gateway failures.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RouterError::InvalidInput(_) => ErrorKind::InvalidInput,
            RouterError::GatewayFailure(_) | RouterError::GatewayTimeout(_) => {
                ErrorKind::GatewayFailure
            }
            RouterError::UnknownOperation(_) => ErrorKind::UnknownOperation,
            RouterError::MissingArgument(_) => ErrorKind::MissingArgument,
            RouterError::UnknownArgument(_) => ErrorKind::UnknownArgument,
            RouterError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
        }
    }

    /// Whether the gateway call ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RouterError::GatewayTimeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_gateway_failure() {
        let err = RouterError::GatewayTimeout(Duration::from_secs(30));
        assert_eq!(err.kind(), ErrorKind::GatewayFailure);
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "Gateway timed out after 30s");
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = RouterError::TypeMismatch {
            parameter: "ticket_id".to_string(),
            expected: ParamKind::Integer,
            actual: serde_json::json!("four"),
        };
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(
            err.to_string(),
            r#"Type mismatch for argument 'ticket_id': expected integer, got "four""#
        );
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::UnknownOperation).unwrap();
        assert_eq!(json, r#""unknown_operation""#);
    }
}
