//! LinkedIn job search adapter.
//!
//! Fetches the public job search page directly and parses the result cards
//! with fixed selectors. This is the only adapter with a request timeout;
//! the public page is slow to fail when LinkedIn throttles.

use super::{build_http_client, element_text, selector, JobBoard, JobListing, Platform, SearchQuery};
use crate::config::SearchSettings;
use crate::error::{Result, ScoutError};
use async_trait::async_trait;
use scraper::Html;
use tracing::{info, warn};

pub struct LinkedinBoard {
    client: reqwest::Client,
}

impl LinkedinBoard {
    pub fn new(settings: &SearchSettings) -> Result<Self> {
        let client = build_http_client(
            &settings.user_agent,
            Some(settings.linkedin_timeout_seconds),
        )?;
        Ok(Self { client })
    }

    fn search_url(query: &SearchQuery) -> String {
        format!(
            "https://www.linkedin.com/jobs/search?keywords={}&location={}",
            urlencoding::encode(&query.role),
            urlencoding::encode(&query.location)
        )
    }
}

#[async_trait]
impl JobBoard for LinkedinBoard {
    fn platform(&self) -> Platform {
        Platform::LinkedIn
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobListing>> {
        let url = Self::search_url(query);
        info!("Searching LinkedIn for '{}' in '{}'", query.role, query.location);

        let response = self.client.get(&url).send().await?;
        let response = response.error_for_status().map_err(|e| {
            ScoutError::Board(format!("Could not connect to LinkedIn: {}", e))
        })?;
        let html = response.text().await?;

        let jobs = parse_listings(&html)?;
        if jobs.is_empty() {
            warn!("No job cards found on LinkedIn; the page structure may have changed");
        } else {
            info!("Found {} jobs on LinkedIn", jobs.len());
        }
        Ok(jobs)
    }
}

/// Parse job cards out of a LinkedIn search results page.
///
/// Cards missing a title, company, or link are skipped.
pub fn parse_listings(html: &str) -> Result<Vec<JobListing>> {
    let card_sel = selector("div.base-card")?;
    let title_sel = selector("h3.base-search-card__title")?;
    let company_sel = selector("h4.base-search-card__subtitle")?;
    let link_sel = selector("a.base-card__full-link")?;

    let document = Html::parse_document(html);
    let mut jobs = Vec::new();

    for card in document.select(&card_sel) {
        let title = card.select(&title_sel).next().map(element_text);
        let company = card.select(&company_sel).next().map(element_text);
        let url = card
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);

        if let (Some(title), Some(company), Some(url)) = (title, company, url) {
            jobs.push(JobListing {
                platform: Platform::LinkedIn,
                title,
                company,
                url,
            });
        }
    }

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <html><body>
        <div class="base-card">
          <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/1"></a>
          <h3 class="base-search-card__title">
            Rust Engineer
          </h3>
          <h4 class="base-search-card__subtitle">Ferrous Corp</h4>
        </div>
        <div class="base-card">
          <h3 class="base-search-card__title">No Link Role</h3>
          <h4 class="base-search-card__subtitle">Linkless Inc</h4>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_listings() {
        let jobs = parse_listings(SAMPLE).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].platform, Platform::LinkedIn);
        assert_eq!(jobs[0].title, "Rust Engineer");
        assert_eq!(jobs[0].company, "Ferrous Corp");
        assert_eq!(jobs[0].url, "https://www.linkedin.com/jobs/view/1");
    }

    #[test]
    fn test_parse_empty_page() {
        let jobs = parse_listings("<html><body></body></html>").unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_search_url_encodes_spaces() {
        let query = SearchQuery {
            role: "Software Engineer".to_string(),
            location: "New Delhi".to_string(),
        };
        let url = LinkedinBoard::search_url(&query);
        assert_eq!(
            url,
            "https://www.linkedin.com/jobs/search?keywords=Software%20Engineer&location=New%20Delhi"
        );
    }
}
