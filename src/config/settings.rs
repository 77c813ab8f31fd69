//! Configuration settings for Switchyard.

use crate::catalog::ToolCatalog;
use crate::error::{Result, SwitchyardError};
use crate::gateway::MultiCallPolicy;
use crate::router::{DEFAULT_MAX_QUERY_CHARS, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default instruction sent ahead of every query.
const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a function routing assistant. Map the user query to the appropriate function call.";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub gateway: GatewaySettings,
    pub router: RouterSettings,
    pub catalog: CatalogSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8012,
        }
    }
}

/// Reasoning service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    /// Base URL of the OpenAI-compatible API.
    pub api_base: String,
    /// Chat model used for routing.
    pub model: String,
    /// Environment variable holding the bearer token.
    pub api_key_env: String,
    /// Bound on each outbound call, in seconds.
    pub timeout_seconds: u64,
    /// Behavior when a reply carries several tool calls (first, reject).
    pub on_multiple_calls: MultiCallPolicy,
    /// Instruction sent as the system message.
    pub system_prompt: String,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            api_base: "https://aipipe.org/openrouter/v1".to_string(),
            model: "openai/gpt-4.1-nano".to_string(),
            api_key_env: "AI_PIPE_TOKEN".to_string(),
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
            on_multiple_calls: MultiCallPolicy::First,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl GatewaySettings {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            Ok(_) => Err(SwitchyardError::Config(format!(
                "{} is empty. Set it with: export {}='...'",
                self.api_key_env, self.api_key_env
            ))),
            Err(_) => Err(SwitchyardError::Config(format!(
                "{} not set. Set it with: export {}='...'",
                self.api_key_env, self.api_key_env
            ))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Router limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Longest accepted query, in characters.
    pub max_query_chars: usize,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
        }
    }
}

/// Tool catalog source.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogSettings {
    /// Catalog file (.toml or OpenAI-style .json). Built-in catalog when unset.
    pub path: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Settings>(&content)?
        } else {
            Settings::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| SwitchyardError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("switchyard")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded catalog file path, if one is configured.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.path.as_deref().map(Self::expand_path)
    }

    /// Build the tool catalog: the configured file, or the built-in one.
    pub fn load_catalog(&self) -> Result<ToolCatalog> {
        match self.catalog_path() {
            Some(path) => ToolCatalog::load(&path),
            None => Ok(ToolCatalog::seed()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.gateway.timeout_seconds == 0 {
            return Err(SwitchyardError::Config(
                "gateway.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.router.max_query_chars == 0 {
            return Err(SwitchyardError::Config(
                "router.max_query_chars must be greater than zero".to_string(),
            ));
        }
        if !self.gateway.api_base.starts_with("http://") && !self.gateway.api_base.starts_with("https://") {
            return Err(SwitchyardError::Config(format!(
                "gateway.api_base must be an http(s) URL, got '{}'",
                self.gateway.api_base
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(Some(&dir.path().join("absent.toml"))).unwrap();

        assert_eq!(settings.server.port, 8012);
        assert_eq!(settings.gateway.model, "openai/gpt-4.1-nano");
        assert_eq!(settings.gateway.timeout(), Duration::from_secs(30));
        assert_eq!(settings.gateway.on_multiple_calls, MultiCallPolicy::First);
        assert!(settings.catalog.path.is_none());
    }

    #[test]
    fn test_partial_file_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
port = 9000

[gateway]
model = "openai/gpt-4.1-mini"
on_multiple_calls = "reject"
"#
        )
        .unwrap();

        let settings = Settings::load_from(Some(&file.path().to_path_buf())).unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.gateway.model, "openai/gpt-4.1-mini");
        assert_eq!(settings.gateway.on_multiple_calls, MultiCallPolicy::Reject);
        assert_eq!(settings.gateway.api_key_env, "AI_PIPE_TOKEN");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[gateway]\ntimeout_seconds = 0\n").unwrap();

        let err = Settings::load_from(Some(&file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, SwitchyardError::Config(_)));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.router.max_query_chars = 500;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.router.max_query_chars, 500);
    }

    #[test]
    fn test_api_key_from_named_variable() {
        let gateway = GatewaySettings {
            api_key_env: "SWITCHYARD_TEST_KEY_PRESENT".to_string(),
            ..Default::default()
        };
        std::env::set_var("SWITCHYARD_TEST_KEY_PRESENT", "secret");
        assert_eq!(gateway.api_key().unwrap(), "secret");

        let missing = GatewaySettings {
            api_key_env: "SWITCHYARD_TEST_KEY_ABSENT".to_string(),
            ..Default::default()
        };
        assert!(matches!(missing.api_key(), Err(SwitchyardError::Config(_))));
    }

    #[test]
    fn test_default_catalog_is_seed() {
        let catalog = Settings::default().load_catalog().unwrap();
        assert_eq!(catalog.len(), 5);
    }
}
