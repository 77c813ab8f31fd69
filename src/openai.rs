//! OpenAI-compatible client configuration.

use crate::error::Result;
use async_openai::{config::OpenAIConfig, Client};
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use std::time::Duration;

/// Backoff that gives up on the first failure, including 429 replies.
pub fn no_retry() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

/// Create a client for an OpenAI-compatible endpoint with a request timeout.
///
/// Every request is attempted exactly once, so the timeout bounds the whole
/// exchange.
pub fn create_client(api_base: &str, api_key: &str, timeout: Duration) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder().timeout(timeout).build()?;

    let config = OpenAIConfig::new()
        .with_api_base(api_base)
        .with_api_key(api_key);

    Ok(Client::with_config(config)
        .with_http_client(http_client)
        .with_backoff(no_retry()))
}
