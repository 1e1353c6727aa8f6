//! Naukri job search adapter.
//!
//! Naukri renders its result list with client-side scripts, so a plain
//! fetch returns an empty shell. This adapter drives an external headless
//! Chromium per call to dump the rendered DOM, then parses it like the
//! other boards. The child process is scoped to the call: it is killed on
//! drop and bounded by a hard wall-clock timeout, so it cannot outlive the
//! search on any exit path.

use super::{element_text, selector, JobBoard, JobListing, Platform, SearchQuery};
use crate::config::SearchSettings;
use crate::error::{Result, ScoutError};
use async_trait::async_trait;
use scraper::Html;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

pub struct NaukriBoard {
    binary: String,
    user_agent: String,
    wait_ms: u64,
    timeout: Duration,
}

impl NaukriBoard {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            binary: settings.browser_binary.clone(),
            user_agent: settings.user_agent.clone(),
            wait_ms: settings.browser_wait_ms,
            timeout: Duration::from_secs(settings.browser_timeout_seconds),
        }
    }

    fn search_url(query: &SearchQuery) -> String {
        format!(
            "https://www.naukri.com/{}-jobs-in-{}",
            slug(&query.role),
            slug(&query.location)
        )
    }

    /// Render a page in a throwaway headless browser session and return its DOM.
    async fn dump_rendered_dom(&self, url: &str) -> Result<String> {
        // Scratch profile dir, removed when the guard drops
        let profile = tempfile::tempdir()?;

        debug!("Launching {} for {}", self.binary, url);

        let mut command = Command::new(&self.binary);
        command
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg(format!("--user-agent={}", self.user_agent))
            .arg(format!("--user-data-dir={}", profile.path().display()))
            .arg(format!("--virtual-time-budget={}", self.wait_ms))
            .arg("--dump-dom")
            .arg(url)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let result = tokio::time::timeout(self.timeout, command.output()).await;

        let output = match result {
            // Timeout: the output future is dropped here, which kills the child
            Err(_) => {
                return Err(ScoutError::Browser(format!(
                    "Browser did not finish within {}s",
                    self.timeout.as_secs()
                )))
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScoutError::ToolNotFound(self.binary.clone()))
            }
            Ok(Err(e)) => {
                return Err(ScoutError::Browser(format!(
                    "Failed to launch {}: {}",
                    self.binary, e
                )))
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScoutError::Browser(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl JobBoard for NaukriBoard {
    fn platform(&self) -> Platform {
        Platform::Naukri
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobListing>> {
        let url = Self::search_url(query);
        info!("Searching Naukri for '{}' in '{}'", query.role, query.location);

        let html = self.dump_rendered_dom(&url).await?;

        let jobs = parse_listings(&html)?;
        if jobs.is_empty() {
            warn!("No job elements found on Naukri; the page structure may have changed");
        } else {
            info!("Found {} jobs on Naukri", jobs.len());
        }
        Ok(jobs)
    }
}

/// Lowercase hyphen slug used in Naukri search paths.
fn slug(part: &str) -> String {
    part.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

/// Parse job tuples out of a rendered Naukri results page.
///
/// Tries the current wrapper class first, then the older tuple markup.
pub fn parse_listings(html: &str) -> Result<Vec<JobListing>> {
    let primary_sel = selector("div.srp-jobtuple-wrapper")?;
    let fallback_sel = selector("article.jobTuple")?;
    let title_sel = selector("a.title")?;
    let company_sel = selector("a.comp-name")?;

    let document = Html::parse_document(html);

    let mut cards: Vec<_> = document.select(&primary_sel).collect();
    if cards.is_empty() {
        debug!("Primary Naukri selector matched nothing, trying fallback");
        cards = document.select(&fallback_sel).collect();
    }

    let mut jobs = Vec::new();
    for card in cards {
        let title_link = card.select(&title_sel).next();
        let company = card.select(&company_sel).next().map(element_text);

        let (Some(link), Some(company)) = (title_link, company) else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        jobs.push(JobListing {
            platform: Platform::Naukri,
            title: element_text(link),
            company,
            url: href.to_string(),
        });
    }

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMARY: &str = r##"
        <div class="srp-jobtuple-wrapper">
          <a class="title" href="https://www.naukri.com/job/1">Data Scientist</a>
          <a class="comp-name" href="#">Insight Labs</a>
        </div>
    "##;

    const FALLBACK: &str = r##"
        <article class="jobTuple">
          <a class="title" href="https://www.naukri.com/job/2">ML Engineer</a>
          <a class="comp-name" href="#">Vector Works</a>
        </article>
    "##;

    #[test]
    fn test_parse_primary_selector() {
        let jobs = parse_listings(PRIMARY).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].platform, Platform::Naukri);
        assert_eq!(jobs[0].title, "Data Scientist");
        assert_eq!(jobs[0].url, "https://www.naukri.com/job/1");
    }

    #[test]
    fn test_parse_fallback_selector() {
        let jobs = parse_listings(FALLBACK).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Vector Works");
    }

    #[test]
    fn test_search_url_slug() {
        let query = SearchQuery {
            role: "Data Scientist".to_string(),
            location: "Chennai".to_string(),
        };
        assert_eq!(
            NaukriBoard::search_url(&query),
            "https://www.naukri.com/data-scientist-jobs-in-chennai"
        );
    }
}
