//! CLI command implementations.

mod config;
mod doctor;
mod route;
mod serve;
mod tools;

pub use config::run_config;
pub use doctor::run_doctor;
pub use route::run_route;
pub use serve::run_serve;
pub use tools::run_tools;

use crate::config::Settings;
use crate::gateway::{GatewayConfig, OpenAIGateway};
use crate::router::FunctionCallRouter;
use std::sync::Arc;
use tracing::debug;

/// Build a router backed by the configured OpenAI-compatible gateway.
fn build_router(settings: &Settings, model: Option<&str>) -> crate::error::Result<FunctionCallRouter> {
    let catalog = Arc::new(settings.load_catalog()?);

    let mut gateway = OpenAIGateway::new(GatewayConfig::from_settings(&settings.gateway)?)?;
    if let Some(model) = model {
        gateway = gateway.with_model(model);
    }
    debug!("Routing with {} over {} tools", gateway.model(), catalog.len());

    Ok(FunctionCallRouter::new(catalog, Arc::new(gateway))
        .with_timeout(settings.gateway.timeout())
        .with_max_query_chars(settings.router.max_query_chars))
}
