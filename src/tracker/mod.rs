//! Application tracker adapter (Notion).
//!
//! Saves selected jobs into a Notion database, one page per job. There is
//! no idempotence: re-submitting the same jobs creates duplicate pages.

use crate::config::TrackerSettings;
use crate::error::{Result, ScoutError};
use serde::Deserialize;
use tracing::{error, info};

/// Environment variable holding the Notion integration token.
pub const NOTION_TOKEN_VAR: &str = "NOTION_API_TOKEN";
/// Environment variable holding the target Notion database id.
pub const NOTION_DATABASE_VAR: &str = "NOTION_DATABASE_ID";

/// Message returned for an empty or non-list selection.
pub const NO_JOBS_SELECTED_MESSAGE: &str = "No jobs were selected to be saved.";

const NOTION_PAGES_URL: &str = "https://api.notion.com/v1/pages";

/// One job record as submitted for tracking. Missing fields fall back to
/// placeholders rather than failing the whole batch.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackedJob {
    #[serde(default = "default_field")]
    pub title: String,
    #[serde(default = "default_field")]
    pub company: String,
    #[serde(default = "default_url")]
    pub url: String,
}

fn default_field() -> String {
    "N/A".to_string()
}

fn default_url() -> String {
    "#".to_string()
}

pub struct NotionTracker {
    client: reqwest::Client,
    notion_version: String,
    status_name: String,
}

impl NotionTracker {
    pub fn new(settings: &TrackerSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            notion_version: settings.notion_version.clone(),
            status_name: settings.status_name.clone(),
        }
    }

    /// Save a JSON-encoded list of jobs to the Notion database.
    ///
    /// Returns a human-readable confirmation message; credential and API
    /// failures surface as errors for the caller to stringify.
    pub async fn save_jobs(&self, jobs_json: &str) -> Result<String> {
        info!("Received request to save jobs to Notion");

        let (token, database_id) = self.credentials()?;

        let jobs: Vec<TrackedJob> = match serde_json::from_str(jobs_json) {
            Ok(jobs) => jobs,
            Err(_) => return Ok(NO_JOBS_SELECTED_MESSAGE.to_string()),
        };
        if jobs.is_empty() {
            return Ok(NO_JOBS_SELECTED_MESSAGE.to_string());
        }

        let mut saved_count = 0usize;
        for job in &jobs {
            self.create_page(&token, &database_id, job).await?;
            saved_count += 1;
        }

        let message = format!(
            "Successfully saved {} job(s) to your Notion database.",
            saved_count
        );
        info!("{}", message);
        Ok(message)
    }

    /// Both credentials must be present; missing ones fail this call only.
    fn credentials(&self) -> Result<(String, String)> {
        let token = std::env::var(NOTION_TOKEN_VAR).ok().filter(|v| !v.is_empty());
        let database_id = std::env::var(NOTION_DATABASE_VAR).ok().filter(|v| !v.is_empty());
        match (token, database_id) {
            (Some(token), Some(database_id)) => Ok((token, database_id)),
            _ => Err(ScoutError::Config(format!(
                "{} and {} must be set",
                NOTION_TOKEN_VAR, NOTION_DATABASE_VAR
            ))),
        }
    }

    async fn create_page(&self, token: &str, database_id: &str, job: &TrackedJob) -> Result<()> {
        let body = serde_json::json!({
            "parent": { "database_id": database_id },
            "properties": {
                "Name": {
                    "title": [{ "text": { "content": format!("{} at {}", job.title, job.company) } }]
                },
                "URL": { "url": job.url },
                "Status": { "select": { "name": self.status_name } }
            }
        });

        let response = self
            .client
            .post(NOTION_PAGES_URL)
            .bearer_auth(token)
            .header("Notion-Version", &self.notion_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScoutError::Tracker(format!("Notion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            error!("Notion page creation failed ({}): {}", status, detail);
            return Err(ScoutError::Tracker(format!(
                "Notion returned {} while saving '{}'",
                status, job.title
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracked_job_defaults() {
        let job: TrackedJob = serde_json::from_str(r#"{"title": "Engineer"}"#).unwrap();
        assert_eq!(job.title, "Engineer");
        assert_eq!(job.company, "N/A");
        assert_eq!(job.url, "#");
    }

    #[tokio::test]
    async fn test_invalid_json_is_no_jobs() {
        let tracker = NotionTracker::new(&TrackerSettings::default());
        // Scoped env so the credential gate passes without touching the network
        std::env::set_var(NOTION_TOKEN_VAR, "secret");
        std::env::set_var(NOTION_DATABASE_VAR, "db");

        let message = tracker.save_jobs("not json").await.unwrap();
        assert_eq!(message, NO_JOBS_SELECTED_MESSAGE);

        let message = tracker.save_jobs("[]").await.unwrap();
        assert_eq!(message, NO_JOBS_SELECTED_MESSAGE);

        std::env::remove_var(NOTION_TOKEN_VAR);
        std::env::remove_var(NOTION_DATABASE_VAR);
    }
}
