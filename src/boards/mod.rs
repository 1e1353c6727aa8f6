//! Job board adapters and shared search types.
//!
//! Each board adapter builds a platform-specific search URL, fetches the
//! result page, and maps fixed structural selectors to [`JobListing`]
//! records. Zero matches is a sentinel outcome, not an error; network
//! failures and page-structure drift surface as errors. No retries,
//! pagination, or caching.

mod indeed;
mod linkedin;
mod naukri;

pub use indeed::IndeedBoard;
pub use linkedin::LinkedinBoard;
pub use naukri::NaukriBoard;

use crate::error::{Result, ScoutError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sentinel message returned when a board search matches nothing.
pub const NO_JOBS_MESSAGE: &str = "No jobs found for this query.";

/// Fixed message for a malformed "role, location" query.
pub const QUERY_FORMAT_MESSAGE: &str = "Please provide the input as 'role, location'.";

/// Supported job platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    LinkedIn,
    Naukri,
    Indeed,
}

impl Platform {
    /// All supported platforms.
    pub const ALL: [Platform; 3] = [Platform::LinkedIn, Platform::Naukri, Platform::Indeed];
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::LinkedIn => write!(f, "LinkedIn"),
            Platform::Naukri => write!(f, "Naukri"),
            Platform::Indeed => write!(f, "Indeed"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "linkedin" => Ok(Platform::LinkedIn),
            "naukri" => Ok(Platform::Naukri),
            "indeed" => Ok(Platform::Indeed),
            _ => Err(ScoutError::InvalidInput(format!(
                "Unknown platform: {}",
                s
            ))),
        }
    }
}

/// A single job listing scraped from a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub platform: Platform,
    pub title: String,
    pub company: String,
    pub url: String,
}

/// A parsed "role, location" search query.
///
/// Parsing is pure and happens before any network call, so a malformed
/// query never reaches a board.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub role: String,
    pub location: String,
}

impl SearchQuery {
    /// Parse a query of the form "role, location".
    ///
    /// Exactly two non-empty comma-separated parts are required.
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [role, location] if !role.is_empty() && !location.is_empty() => Ok(Self {
                role: role.to_string(),
                location: location.to_string(),
            }),
            _ => Err(ScoutError::InvalidInput(QUERY_FORMAT_MESSAGE.to_string())),
        }
    }
}

/// Common contract for job board adapters.
#[async_trait]
pub trait JobBoard: Send + Sync {
    /// The platform this adapter searches.
    fn platform(&self) -> Platform;

    /// Search the board. An empty vec means no matches (sentinel outcome).
    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobListing>>;
}

/// Build the shared scraping HTTP client with a browser User-Agent.
pub(crate) fn build_http_client(user_agent: &str, timeout_secs: Option<u64>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(user_agent.to_string());
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| ScoutError::Board(format!("Failed to build HTTP client: {}", e)))
}

/// Parse a fixed CSS selector, mapping syntax errors to a board error.
pub(crate) fn selector(css: &str) -> Result<scraper::Selector> {
    scraper::Selector::parse(css)
        .map_err(|e| ScoutError::Board(format!("Invalid selector '{}': {}", css, e)))
}

/// Collapse an element's text nodes into one whitespace-normalized string.
pub(crate) fn element_text(element: scraper::ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_query() {
        let query = SearchQuery::parse("Software Engineer, Bengaluru").unwrap();
        assert_eq!(query.role, "Software Engineer");
        assert_eq!(query.location, "Bengaluru");
    }

    #[test]
    fn test_parse_missing_comma() {
        let err = SearchQuery::parse("Software Engineer Bengaluru").unwrap_err();
        match err {
            ScoutError::InvalidInput(msg) => assert_eq!(msg, QUERY_FORMAT_MESSAGE),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_too_many_commas() {
        let err = SearchQuery::parse("Engineer, Chennai, India").unwrap_err();
        match err {
            ScoutError::InvalidInput(msg) => assert_eq!(msg, QUERY_FORMAT_MESSAGE),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_part() {
        assert!(SearchQuery::parse("Engineer, ").is_err());
        assert!(SearchQuery::parse(", Chennai").is_err());
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("linkedin".parse::<Platform>().unwrap(), Platform::LinkedIn);
        assert_eq!("Naukri".parse::<Platform>().unwrap(), Platform::Naukri);
        assert!("monster".parse::<Platform>().is_err());
    }
}
