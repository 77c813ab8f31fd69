//! Gateways to the external reasoning service that selects an operation.
//!
//! A gateway only proposes: it returns the chosen operation name and the raw
//! argument object exactly as the service produced them. Checking the
//! proposal against the catalog is the router's job.

mod fixed;
mod openai;

pub use fixed::FixedGateway;
pub use openai::{GatewayConfig, OpenAIGateway};

use crate::catalog::ToolCatalog;
use crate::error::RouterError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The service's raw, untrusted choice of operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CallProposal {
    pub name: String,
    pub arguments: Map<String, Value>,
}

/// What to do when a reply carries more than one tool call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiCallPolicy {
    /// Keep the first call and discard the rest.
    #[default]
    First,
    /// Fail the request as ambiguous.
    Reject,
}

impl std::str::FromStr for MultiCallPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(MultiCallPolicy::First),
            "reject" => Ok(MultiCallPolicy::Reject),
            _ => Err(format!("Unknown multiple-call policy: {}", s)),
        }
    }
}

impl std::fmt::Display for MultiCallPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MultiCallPolicy::First => write!(f, "first"),
            MultiCallPolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Trait for reasoning-service gateways.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Ask the service to pick exactly one operation from `catalog` for `query`.
    async fn propose(&self, query: &str, catalog: &ToolCatalog) -> Result<CallProposal, RouterError>;
}
