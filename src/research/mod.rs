//! Company research adapter.
//!
//! Searches the web for a company profile through SerpAPI, takes the first
//! organic result, fetches that page, and extracts its main article text.
//! Each of the three failure points (search failure, no results, extraction
//! failure) is a distinct error.

mod article;

pub use article::extract_article_text;

use crate::config::ResearchSettings;
use crate::error::{Result, ScoutError};
use serpapi_search_rust::serp_api_search::SerpApiSearch;
use std::collections::HashMap;
use tracing::{info, warn};

/// Environment variable holding the SerpAPI key.
pub const SERPAPI_KEY_VAR: &str = "SERPAPI_API_KEY";

pub struct CompanyResearcher {
    client: reqwest::Client,
    max_article_chars: usize,
}

impl CompanyResearcher {
    pub fn new(settings: &ResearchSettings, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(std::time::Duration::from_secs(settings.fetch_timeout_seconds))
            .build()
            .map_err(|e| ScoutError::Search(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            max_article_chars: settings.max_article_chars,
        })
    }

    /// Research a company: search for its profile and return the main text
    /// of the top result page.
    pub async fn research(&self, company_name: &str) -> Result<String> {
        info!("Researching company: {}", company_name);

        let top_url = self.top_result_url(company_name).await?;
        info!("Top result for {}: {}", company_name, top_url);

        let html = self
            .client
            .get(&top_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                ScoutError::Article(format!("Could not read the content from {}: {}", top_url, e))
            })?
            .text()
            .await
            .map_err(|e| {
                ScoutError::Article(format!("Could not read the content from {}: {}", top_url, e))
            })?;

        let text = extract_article_text(&html)?;
        if text.is_empty() {
            warn!("No article text extracted from {}", top_url);
            return Err(ScoutError::Article(
                "Found a relevant page but could not extract its content.".to_string(),
            ));
        }

        Ok(truncate_chars(&text, self.max_article_chars))
    }

    /// Query the search engine and return the first organic result's URL.
    async fn top_result_url(&self, company_name: &str) -> Result<String> {
        let api_key = std::env::var(SERPAPI_KEY_VAR)
            .map_err(|_| ScoutError::Config(format!("{} is not set", SERPAPI_KEY_VAR)))?;

        let mut params = HashMap::<String, String>::new();
        params.insert("engine".to_string(), "google".to_string());
        params.insert("q".to_string(), format!("{} company profile", company_name));
        params.insert("hl".to_string(), "en".to_string());

        let search = SerpApiSearch::google(params, api_key);
        let results = search
            .json()
            .await
            .map_err(|e| ScoutError::Search(format!("Company search failed: {}", e)))?;

        first_organic_link(&results).ok_or_else(|| {
            ScoutError::Search(format!(
                "No search results found for {}",
                company_name
            ))
        })
    }
}

/// Pull the first organic result link out of a SerpAPI response.
fn first_organic_link(results: &serde_json::Value) -> Option<String> {
    results
        .get("organic_results")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|r| r.get("link"))
        .and_then(|v| v.as_str())
        .map(String::from)
}

/// Truncate to a character budget on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_organic_link() {
        let results = serde_json::json!({
            "organic_results": [
                {"title": "Acme Corp", "link": "https://acme.example/about"},
                {"title": "Acme on Wiki", "link": "https://wiki.example/acme"}
            ]
        });
        assert_eq!(
            first_organic_link(&results),
            Some("https://acme.example/about".to_string())
        );
    }

    #[test]
    fn test_first_organic_link_missing() {
        assert_eq!(first_organic_link(&serde_json::json!({})), None);
        assert_eq!(
            first_organic_link(&serde_json::json!({"organic_results": []})),
            None
        );
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }
}
