//! Switchyard - natural-language to function-call routing
//!
//! Turns a free-text request into exactly one call from a fixed catalog of
//! typed operations, chosen by a chat model and validated before it is
//! returned.
//!
//! # Architecture
//!
//! - `catalog` - Immutable registry of tool specs
//! - `validator` - Argument checking against a tool's parameter schema
//! - `gateway` - Reasoning-service abstraction (OpenAI-compatible, scripted)
//! - `router` - Query → proposal → validated call
//! - `config` - Configuration management
//! - `cli` - Command line and HTTP front end
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use switchyard::catalog::ToolCatalog;
//! use switchyard::config::Settings;
//! use switchyard::gateway::{GatewayConfig, OpenAIGateway};
//! use switchyard::router::FunctionCallRouter;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let gateway = OpenAIGateway::new(GatewayConfig::from_settings(&settings.gateway)?)?;
//!     let router = FunctionCallRouter::new(Arc::new(ToolCatalog::seed()), Arc::new(gateway));
//!
//!     let call = router.route("What's the status of ticket 4521?").await?;
//!     println!("{} {:?}", call.name, call.arguments);
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod openai;
pub mod router;
pub mod validator;

pub use error::{Result, RouterError, SwitchyardError};
