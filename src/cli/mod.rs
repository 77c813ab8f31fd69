//! CLI module for Switchyard.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Switchyard - route natural-language requests to typed function calls
///
/// Presents a fixed catalog of operations to a chat model and returns the
/// single call it selects, validated against the catalog.
#[derive(Parser, Debug)]
#[command(name = "switchyard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SWITCHYARD_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP service (GET /execute?q=...)
    Serve {
        /// Host to bind to (default from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (default from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Route a single query and print the validated call
    Route {
        /// The natural-language request
        query: String,

        /// Chat model to use instead of the configured one
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List the operations in the tool catalog
    Tools,

    /// Check configuration and credentials
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
