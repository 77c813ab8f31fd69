//! Configuration module for Switchyard.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    CatalogSettings, GatewaySettings, GeneralSettings, RouterSettings, ServerSettings, Settings,
};
