//! Pre-flight checks before starting work.
//!
//! Validates that credentials and the catalog are available before a
//! command binds a port or calls the reasoning service.

use crate::config::Settings;
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Serving requires an API key and a loadable catalog.
    Serve,
    /// Routing a single query requires an API key and a loadable catalog.
    Route,
    /// Listing tools requires a loadable catalog.
    Tools,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Serve | Operation::Route => {
            settings.gateway.api_key()?;
            settings.load_catalog()?;
        }
        Operation::Tools => {
            settings.load_catalog()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwitchyardError;

    #[test]
    fn test_check_tools_with_seed_catalog() {
        assert!(check(Operation::Tools, &Settings::default()).is_ok());
    }

    #[test]
    fn test_check_route_without_key() {
        let mut settings = Settings::default();
        settings.gateway.api_key_env = "SWITCHYARD_PREFLIGHT_UNSET_KEY".to_string();
        assert!(matches!(
            check(Operation::Route, &settings),
            Err(SwitchyardError::Config(_))
        ));
    }

    #[test]
    fn test_check_tools_with_missing_catalog_file() {
        let mut settings = Settings::default();
        settings.catalog.path = Some("/nonexistent/switchyard/tools.toml".to_string());
        assert!(matches!(check(Operation::Tools, &settings), Err(SwitchyardError::Io(_))));
    }
}
