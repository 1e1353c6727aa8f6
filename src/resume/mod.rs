//! Resume parsing adapter.
//!
//! Extracts raw text from an uploaded file and asks the LLM for a
//! structured profile: a probable job role plus key skills.

mod extract;

pub use extract::{extract_text, UNSUPPORTED_FILE_MESSAGE};

use crate::config::{Prompts, ResumeSettings};
use crate::error::{Result, ScoutError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs, ResponseFormat,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Profile extracted from a resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub job_role: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl ResumeProfile {
    /// Render the context line handed to the agent when a resume is loaded.
    pub fn context_line(&self) -> String {
        format!(
            "The user has uploaded their resume. Use this information to guide your searches. \
             Their probable job role is '{}' and their skills include '{}'.",
            self.job_role,
            self.skills.join(", ")
        )
    }
}

/// Resume parser backed by the LLM.
pub struct ResumeParser {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    prompts: Prompts,
}

impl ResumeParser {
    pub fn new(settings: &ResumeSettings, prompts: Prompts) -> Self {
        Self {
            client: create_client(),
            model: settings.model.clone(),
            prompts,
        }
    }

    /// Parse an uploaded resume file into a [`ResumeProfile`].
    pub async fn parse(&self, file_bytes: &[u8], file_name: &str) -> Result<ResumeProfile> {
        let raw_text = extract_text(file_bytes, file_name)?;
        self.extract_profile(&raw_text).await
    }

    /// Ask the LLM to turn raw resume text into a structured profile.
    async fn extract_profile(&self, raw_text: &str) -> Result<ResumeProfile> {
        let mut vars = std::collections::HashMap::new();
        vars.insert("resume_text".to_string(), raw_text.to_string());
        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.resume.user, &vars);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .response_format(ResponseFormat::JsonObject)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(self.prompts.resume.system.clone())
                    .build()
                    .map_err(|e| ScoutError::Resume(e.to_string()))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_prompt)
                    .build()
                    .map_err(|e| ScoutError::Resume(e.to_string()))?
                    .into(),
            ])
            .build()
            .map_err(|e| ScoutError::Resume(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ScoutError::OpenAI(format!("Resume extraction failed: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| ScoutError::Resume("No response from model".to_string()))?;

        let profile = parse_profile_json(&content)?;
        info!("Parsed resume profile: role '{}'", profile.job_role);
        Ok(profile)
    }
}

/// Parse a profile out of model output, tolerating code fences.
fn parse_profile_json(content: &str) -> Result<ResumeProfile> {
    let trimmed = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    serde_json::from_str(trimmed)
        .map_err(|e| ScoutError::Resume(format!("Model returned malformed profile JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_json() {
        let profile =
            parse_profile_json(r#"{"job_role": "Data Engineer", "skills": ["SQL", "Spark"]}"#)
                .unwrap();
        assert_eq!(profile.job_role, "Data Engineer");
        assert_eq!(profile.skills, vec!["SQL", "Spark"]);
    }

    #[test]
    fn test_parse_profile_json_with_fences() {
        let profile = parse_profile_json(
            "```json\n{\"job_role\": \"SRE\", \"skills\": [\"Kubernetes\"]}\n```",
        )
        .unwrap();
        assert_eq!(profile.job_role, "SRE");
    }

    #[test]
    fn test_parse_profile_json_malformed() {
        assert!(parse_profile_json("not json at all").is_err());
    }

    #[test]
    fn test_context_line() {
        let profile = ResumeProfile {
            job_role: "Backend Engineer".to_string(),
            skills: vec!["Rust".to_string(), "Postgres".to_string()],
        };
        let line = profile.context_line();
        assert!(line.contains("Backend Engineer"));
        assert!(line.contains("Rust, Postgres"));
    }
}
