//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use crate::research::SERPAPI_KEY_VAR;
use crate::tracker::{NOTION_DATABASE_VAR, NOTION_TOKEN_VAR};
use console::style;
use std::process::Command;

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
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("jobscout Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    // Headless browser (needed for Naukri)
    println!("{}", style("Headless Browser").bold());
    let browser_check = check_browser(&settings.search.browser_binary);
    browser_check.print();
    checks.push(browser_check);

    println!();

    // API keys
    println!("{}", style("API Configuration").bold());
    let key_checks = vec![
        check_required_key("OPENAI_API_KEY", "needed for the agent and resume parsing"),
        check_optional_key(SERPAPI_KEY_VAR, "company research will be unavailable"),
        check_optional_key(NOTION_TOKEN_VAR, "application tracking will be unavailable"),
        check_optional_key(NOTION_DATABASE_VAR, "application tracking will be unavailable"),
    ];
    for check in &key_checks {
        check.print();
    }
    checks.extend(key_checks);

    println!();

    // Configuration
    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using jobscout.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! jobscout is ready to use.");
    }

    Ok(())
}

/// Check the configured browser binary, falling back to common names.
fn check_browser(configured: &str) -> CheckResult {
    let mut candidates = vec![configured.to_string()];
    for name in ["chromium", "chromium-browser", "google-chrome", "chrome"] {
        if name != configured {
            candidates.push(name.to_string());
        }
    }

    for candidate in &candidates {
        if let Ok(output) = Command::new(candidate).arg("--version").output() {
            if output.status.success() {
                let version = String::from_utf8_lossy(&output.stdout)
                    .lines()
                    .next()
                    .unwrap_or("installed")
                    .trim()
                    .to_string();
                let message = if candidate == configured {
                    version
                } else {
                    format!("{} (set search.browser_binary = \"{}\")", version, candidate)
                };
                return CheckResult::ok("browser", &message);
            }
        }
    }

    CheckResult::warning(
        "browser",
        "no headless browser found",
        "Naukri searches need Chromium or Chrome. Install with: sudo apt install chromium",
    )
}

/// Check a key the core features cannot run without.
fn check_required_key(name: &str, purpose: &str) -> CheckResult {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => {
            CheckResult::ok(name, &format!("configured ({})", mask(&key)))
        }
        Ok(_) => CheckResult::error(
            name,
            "empty",
            &format!("Set with: export {}='...' ({})", name, purpose),
        ),
        Err(_) => CheckResult::error(
            name,
            "not set",
            &format!("Set with: export {}='...' ({})", name, purpose),
        ),
    }
}

/// Check a key that only disables one tool when missing.
fn check_optional_key(name: &str, consequence: &str) -> CheckResult {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => {
            CheckResult::ok(name, &format!("configured ({})", mask(&key)))
        }
        _ => CheckResult::warning(name, "not set", consequence),
    }
}

/// Mask a secret for display.
fn mask(key: &str) -> String {
    if key.len() > 11 {
        format!("{}...{}", &key[..7], &key[key.len() - 4..])
    } else {
        "***".to_string()
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: jobscout init (or jobscout config edit)",
        )
    }
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
    fn test_mask_short_keys() {
        assert_eq!(mask("short"), "***");
        assert!(mask("sk-abcdefghijklmnop").starts_with("sk-abcd"));
    }
}
