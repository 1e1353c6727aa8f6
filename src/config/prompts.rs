//! Prompt templates for jobscout.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub agent: AgentPrompts,
    pub resume: ResumePrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}


/// Prompts for the job search agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    pub system: String,
}

impl Default for AgentPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a helpful and proactive job search assistant.

You have tools to search job boards (LinkedIn, Naukri, Indeed), research companies, save jobs to the user's application tracker, and report search analytics.

Guidelines:
- Always be polite and helpful.
- Job board tools take a single string of the form 'role, location' (for example: 'Data Scientist, Chennai').
- Aim to return around 10 job listings unless the user asks for a different number.
- When a search tool returns jobs, first give a brief summary, then present the jobs as a markdown list. Each item must have the title, company, and a clickable URL, like: - **Software Engineer** at Tech Corp - [Apply Here](https://example.com/job1)
- If a tool reports no jobs were found, suggest a helpful alternative search instead of giving up.
- Only save jobs to the tracker when the user explicitly asks you to."#
                .to_string(),
        }
    }
}

/// Prompts for resume profile extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumePrompts {
    pub system: String,
    pub user: String,
}

impl Default for ResumePrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an expert HR assistant. You analyze resume text and extract the candidate's key skills and a concise, probable job title or role they would be suitable for.

Respond with a JSON object of this exact shape:
{
  "job_role": "Senior Software Engineer",
  "skills": ["Python", "Django", "AWS", "Docker", "React"]
}"#
            .to_string(),

            user: r#"Resume text:

{{resume_text}}

Extract the candidate's probable job role and key skills as JSON."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let agent_path = custom_path.join("agent.toml");
            if agent_path.exists() {
                let content = std::fs::read_to_string(&agent_path)?;
                prompts.agent = toml::from_str(&content)?;
            }

            let resume_path = custom_path.join("resume.toml");
            if resume_path.exists() {
                let content = std::fs::read_to_string(&resume_path)?;
                prompts.resume = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.agent.system.is_empty());
        assert!(prompts.resume.user.contains("{{resume_text}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = std::collections::HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }
}
