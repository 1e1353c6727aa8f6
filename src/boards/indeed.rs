//! Indeed job search adapter.
//!
//! Direct HTTP fetch of the search results page. Listing links are
//! site-relative and get joined against the configured Indeed host.

use super::{build_http_client, element_text, selector, JobBoard, JobListing, Platform, SearchQuery};
use crate::config::SearchSettings;
use crate::error::{Result, ScoutError};
use async_trait::async_trait;
use scraper::Html;
use tracing::info;
use url::Url;

pub struct IndeedBoard {
    client: reqwest::Client,
    host: String,
}

impl IndeedBoard {
    pub fn new(settings: &SearchSettings) -> Result<Self> {
        let client = build_http_client(&settings.user_agent, None)?;
        Ok(Self {
            client,
            host: settings.indeed_host.clone(),
        })
    }

    fn search_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}/jobs?q={}&l={}",
            self.host,
            urlencoding::encode(&query.role),
            urlencoding::encode(&query.location)
        )
    }
}

#[async_trait]
impl JobBoard for IndeedBoard {
    fn platform(&self) -> Platform {
        Platform::Indeed
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobListing>> {
        let url = self.search_url(query);
        info!("Searching Indeed for '{}' in '{}'", query.role, query.location);

        let response = self.client.get(&url).send().await?;
        let response = response.error_for_status().map_err(|e| {
            ScoutError::Board(format!("Could not connect to Indeed: {}", e))
        })?;
        let html = response.text().await?;

        let jobs = parse_listings(&html, &self.host)?;
        info!("Found {} jobs on Indeed", jobs.len());
        Ok(jobs)
    }
}

/// Parse job cards out of an Indeed search results page.
pub fn parse_listings(html: &str, host: &str) -> Result<Vec<JobListing>> {
    let card_sel = selector("div.job_seen_beacon")?;
    let title_link_sel = selector("h2.jobTitle a")?;
    let company_sel = selector("span.companyName")?;

    let base = Url::parse(host)
        .map_err(|e| ScoutError::Board(format!("Invalid Indeed host '{}': {}", host, e)))?;

    let document = Html::parse_document(html);
    let mut jobs = Vec::new();

    for card in document.select(&card_sel) {
        let title_link = card.select(&title_link_sel).next();
        let company = card.select(&company_sel).next().map(element_text);

        let (Some(link), Some(company)) = (title_link, company) else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Ok(job_url) = base.join(href) else {
            continue;
        };

        jobs.push(JobListing {
            platform: Platform::Indeed,
            title: element_text(link),
            company,
            url: job_url.to_string(),
        });
    }

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <html><body>
        <div class="job_seen_beacon">
          <h2 class="jobTitle"><a href="/viewjob?jk=abc123">Backend Developer</a></h2>
          <span class="companyName">Acme Systems</span>
        </div>
        <div class="job_seen_beacon">
          <h2 class="jobTitle"><a href="/viewjob?jk=def456">Orphan Role</a></h2>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_listings_joins_relative_urls() {
        let jobs = parse_listings(SAMPLE, "https://in.indeed.com").unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].platform, Platform::Indeed);
        assert_eq!(jobs[0].title, "Backend Developer");
        assert_eq!(jobs[0].company, "Acme Systems");
        assert_eq!(jobs[0].url, "https://in.indeed.com/viewjob?jk=abc123");
    }

    #[test]
    fn test_parse_listings_bad_host() {
        assert!(parse_listings(SAMPLE, "not a url").is_err());
    }
}
