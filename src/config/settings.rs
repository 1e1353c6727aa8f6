//! Configuration settings for jobscout.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub agent: AgentSettings,
    pub search: SearchSettings,
    pub research: ResearchSettings,
    pub resume: ResumeSettings,
    pub tracker: TrackerSettings,
    pub prompts: PromptSettings,
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

/// Agent loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// LLM model used for the reasoning loop.
    pub model: String,
    /// Maximum think/act steps per user prompt.
    pub max_steps: usize,
    /// Number of past user/assistant exchanges kept as LLM context.
    pub history_exchanges: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_steps: 10,
            history_exchanges: 4,
        }
    }
}

/// Job board scraping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// User-Agent header sent with board requests.
    pub user_agent: String,
    /// Request timeout for the LinkedIn fetch, in seconds.
    pub linkedin_timeout_seconds: u64,
    /// Indeed site host (listing URLs are joined against it).
    pub indeed_host: String,
    /// Headless browser binary used for script-rendered boards.
    pub browser_binary: String,
    /// Virtual time budget granted to the browser for page scripts, in ms.
    pub browser_wait_ms: u64,
    /// Hard wall-clock limit for a browser session, in seconds.
    pub browser_timeout_seconds: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            linkedin_timeout_seconds: 10,
            indeed_host: "https://in.indeed.com".to_string(),
            browser_binary: "chromium".to_string(),
            browser_wait_ms: 5000,
            browser_timeout_seconds: 30,
        }
    }
}

/// Company research settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchSettings {
    /// Maximum characters of article text returned to the agent.
    pub max_article_chars: usize,
    /// Request timeout for article fetches, in seconds.
    pub fetch_timeout_seconds: u64,
}

impl Default for ResearchSettings {
    fn default() -> Self {
        Self {
            max_article_chars: 6000,
            fetch_timeout_seconds: 20,
        }
    }
}

/// Resume parsing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeSettings {
    /// LLM model used for profile extraction.
    pub model: String,
}

impl Default for ResumeSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
        }
    }
}

/// Application tracker (Notion) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Notion API version header.
    pub notion_version: String,
    /// Status select value assigned to newly saved jobs.
    pub status_name: String,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            notion_version: "2022-06-28".to_string(),
            status_name: "Saved".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}


impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::ScoutError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jobscout")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.agent.max_steps, 10);
        assert_eq!(settings.agent.history_exchanges, 4);
        assert_eq!(settings.search.linkedin_timeout_seconds, 10);
        assert_eq!(settings.tracker.status_name, "Saved");
    }

    #[test]
    fn test_partial_toml_round_trip() {
        let toml_str = r#"
            [agent]
            model = "gpt-4o"
            max_steps = 6
        "#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.agent.model, "gpt-4o");
        assert_eq!(settings.agent.max_steps, 6);
        // Untouched sections keep their defaults
        assert_eq!(settings.search.browser_wait_ms, 5000);
    }
}
