//! Scripted gateway that always gives the same reply.
//!
//! Useful for testing and offline dry runs.

use super::{CallProposal, CompletionGateway};
use crate::catalog::ToolCatalog;
use crate::error::RouterError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Gateway with a preset reply.
pub struct FixedGateway {
    reply: Result<CallProposal, RouterError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FixedGateway {
    /// Always propose `name` with `arguments`. Non-object arguments become `{}`.
    pub fn proposing(name: &str, arguments: Value) -> Self {
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => Default::default(),
        };
        Self::replying(Ok(CallProposal {
            name: name.to_string(),
            arguments,
        }))
    }

    /// Always fail with `error`.
    pub fn failing(error: RouterError) -> Self {
        Self::replying(Err(error))
    }

    fn replying(reply: Result<CallProposal, RouterError>) -> Self {
        Self {
            reply,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Wait before replying.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of proposals requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionGateway for FixedGateway {
    async fn propose(&self, _query: &str, _catalog: &ToolCatalog) -> Result<CallProposal, RouterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fixed_gateway_replies_and_counts() {
        let gateway = FixedGateway::proposing("get_ticket_status", json!({"ticket_id": 1}));
        let catalog = ToolCatalog::seed();

        let first = gateway.propose("a", &catalog).await.unwrap();
        let second = gateway.propose("b", &catalog).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.arguments.get("ticket_id"), Some(&json!(1)));
        assert_eq!(gateway.call_count(), 2);
    }

    #[test]
    fn test_non_object_arguments_become_empty() {
        let gateway = FixedGateway::proposing("x", json!([1, 2]));
        assert!(matches!(&gateway.reply, Ok(p) if p.arguments.is_empty()));
    }
}
