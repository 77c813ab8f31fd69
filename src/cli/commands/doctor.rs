//! Doctor command - verify configuration, credentials and catalog.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(config_path: Option<&Path>, settings: &Settings) -> anyhow::Result<()> {
    Output::header("Switchyard Doctor");
    println!();
    println!("Checking configuration and credentials...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    let api_checks = vec![check_api_key(settings), check_gateway(settings)];
    for check in &api_checks {
        check.print();
    }
    checks.extend(api_checks);

    println!();

    println!("{}", style("Catalog").bold());
    let catalog_check = check_catalog(settings);
    catalog_check.print();
    checks.push(catalog_check);

    println!();

    println!("{}", style("Configuration").bold());
    let default_path = Settings::default_config_path();
    let config_check = check_config_file(config_path.unwrap_or(default_path.as_path()));
    config_check.print();
    checks.push(config_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before serving requests.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Switchyard is ready to route.");
    }

    Ok(())
}

/// Check that the bearer token is present.
fn check_api_key(settings: &Settings) -> CheckResult {
    let name = settings.gateway.api_key_env.as_str();
    let hint = format!("Set with: export {}='...'", name);

    match settings.gateway.api_key() {
        Ok(key) => CheckResult::ok(name, &format!("configured ({})", mask(&key))),
        Err(e) => CheckResult::error(name, &e.to_string(), &hint),
    }
}

/// Report where requests will go.
fn check_gateway(settings: &Settings) -> CheckResult {
    let gateway = &settings.gateway;
    let detail = format!(
        "{} via {} (timeout {}s, multiple calls: {})",
        gateway.model, gateway.api_base, gateway.timeout_seconds, gateway.on_multiple_calls
    );

    if gateway.api_base.starts_with("https://") {
        CheckResult::ok("Gateway", &detail)
    } else {
        CheckResult::warning("Gateway", &detail, "The bearer token will be sent without TLS")
    }
}

/// Check that the catalog loads.
fn check_catalog(settings: &Settings) -> CheckResult {
    let source = settings
        .catalog_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());

    match settings.load_catalog() {
        Ok(catalog) if catalog.is_empty() => CheckResult::warning(
            "Tool catalog",
            &format!("{} has no tools", source),
            "Every query will fail until at least one tool is declared",
        ),
        Ok(catalog) => CheckResult::ok("Tool catalog", &format!("{} tools from {}", catalog.len(), source)),
        Err(e) => CheckResult::error(
            "Tool catalog",
            &e.to_string(),
            "Fix the file at catalog.path or remove the setting to use the built-in catalog",
        ),
    }
}

/// Check if config file exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: switchyard config edit",
        )
    }
}

/// Show only the edges of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("short"), "*****");
        assert_eq!(mask("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJh...load");
    }

    #[test]
    fn test_check_catalog_builtin() {
        let result = check_catalog(&Settings::default());
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.message.contains("5 tools"));
    }

    #[test]
    fn test_check_catalog_bad_path() {
        let mut settings = Settings::default();
        settings.catalog.path = Some("/nonexistent/tools.json".to_string());
        assert_eq!(check_catalog(&settings).status, CheckStatus::Error);
    }

    #[test]
    fn test_check_gateway_plain_http_warns() {
        let mut settings = Settings::default();
        settings.gateway.api_base = "http://localhost:8080/v1".to_string();
        assert_eq!(check_gateway(&settings).status, CheckStatus::Warning);
    }
}
