//! Natural-language to function-call routing.
//!
//! [`FunctionCallRouter::route`] turns a free-text query into a
//! [`ValidatedCall`]: the gateway proposes an operation, the catalog confirms
//! it exists, and the validator types its arguments. Every failure surfaces
//! as a [`RouterError`]; nothing is retried here.

use crate::catalog::ToolCatalog;
use crate::error::RouterError;
use crate::gateway::CompletionGateway;
use crate::validator::{validate, Arguments};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default bound on a single gateway call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default upper limit on query length, in characters.
pub const DEFAULT_MAX_QUERY_CHARS: usize = 4000;

/// A proposal that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedCall {
    pub name: String,
    pub arguments: Arguments,
}

/// Stateless router, shared across concurrent requests.
pub struct FunctionCallRouter {
    catalog: Arc<ToolCatalog>,
    gateway: Arc<dyn CompletionGateway>,
    timeout: Duration,
    max_query_chars: usize,
}

impl FunctionCallRouter {
    /// Create a router with default limits.
    pub fn new(catalog: Arc<ToolCatalog>, gateway: Arc<dyn CompletionGateway>) -> Self {
        Self {
            catalog,
            gateway,
            timeout: DEFAULT_TIMEOUT,
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
        }
    }

    /// Set the bound on each gateway call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum accepted query length.
    pub fn with_max_query_chars(mut self, max: usize) -> Self {
        self.max_query_chars = max;
        self
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Route a query to exactly one validated catalog call.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn route(&self, query: &str) -> Result<ValidatedCall, RouterError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RouterError::InvalidInput("Query is empty".to_string()));
        }
        let chars = query.chars().count();
        if chars > self.max_query_chars {
            return Err(RouterError::InvalidInput(format!(
                "Query is {} characters, limit is {}",
                chars, self.max_query_chars
            )));
        }

        // Dropping the gateway future on timeout cancels the outbound call.
        let proposal = tokio::time::timeout(self.timeout, self.gateway.propose(query, &self.catalog))
            .await
            .map_err(|_| RouterError::GatewayTimeout(self.timeout))??;

        debug!("Gateway proposed {} with {} arguments", proposal.name, proposal.arguments.len());

        let spec = self.catalog.lookup(&proposal.name).ok_or_else(|| {
            warn!("Gateway proposed an operation outside the catalog: {}", proposal.name);
            RouterError::UnknownOperation(proposal.name.clone())
        })?;

        let arguments = validate(spec, &proposal.arguments).inspect_err(|e| {
            warn!("Rejected arguments for {}: {}", spec.name, e);
        })?;

        info!("Routed query to {}", spec.name);
        Ok(ValidatedCall {
            name: spec.name.clone(),
            arguments,
        })
    }
}
