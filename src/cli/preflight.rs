//! Pre-flight checks before expensive operations.
//!
//! Validates that required credentials and tools are available before
//! starting operations that would otherwise fail midway. Credentials that
//! only one tool needs (SerpAPI, Notion) are deliberately not checked for
//! the agent: a missing key fails that tool call with a textual
//! observation, not the whole session.

use crate::error::{Result, ScoutError};
use crate::research::SERPAPI_KEY_VAR;
use crate::tracker::{NOTION_DATABASE_VAR, NOTION_TOKEN_VAR};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Chat and one-shot agent runs require the LLM API key.
    Agent,
    /// Resume parsing requires the LLM API key.
    Resume,
    /// Company research requires the SerpAPI key.
    Research,
    /// Tracking requires the Notion credentials.
    Track,
    /// A direct Naukri search requires the headless browser binary.
    Browser(String),
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Agent | Operation::Resume => {
            check_env("OPENAI_API_KEY")?;
        }
        Operation::Research => {
            check_env(SERPAPI_KEY_VAR)?;
        }
        Operation::Track => {
            check_env(NOTION_TOKEN_VAR)?;
            check_env(NOTION_DATABASE_VAR)?;
        }
        Operation::Browser(binary) => {
            check_tool(&binary)?;
        }
    }
    Ok(())
}

/// Check that an environment variable is set and non-empty.
fn check_env(name: &str) -> Result<()> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(()),
        Ok(_) => Err(ScoutError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            name, name
        ))),
        Err(_) => Err(ScoutError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            name, name
        ))),
    }
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(ScoutError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ScoutError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(ScoutError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_missing_tool() {
        let err = check(Operation::Browser("definitely-not-a-browser".to_string()));
        assert!(matches!(err, Err(ScoutError::ToolNotFound(_))));
    }
}
