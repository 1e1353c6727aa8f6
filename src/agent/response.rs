//! Post-processing of the agent's final answer.
//!
//! The agent is prompted to present jobs as a markdown list; this module
//! scrapes that shape back out of the free-form reply so the UI can offer
//! structured actions (tracking, selection). A JSON array reply is the
//! degraded-mode fallback; anything else is a plain message.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A job reference recovered from the agent's reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub url: String,
}

/// The agent's reply after post-processing.
#[derive(Debug, Clone)]
pub struct AgentReply {
    /// Display text (reformatted when the raw reply was a JSON array).
    pub message: String,
    /// Structured job records, when the reply contained any.
    pub jobs: Option<Vec<JobRecord>>,
}

/// Format one job record in the markdown job-list shape.
pub fn format_job_line(job: &JobRecord) -> String {
    format!(
        "- **{}** at {} - [Apply Here]({})",
        job.title, job.company, job.url
    )
}

/// Extract job data from a final agent answer.
///
/// Tries the markdown job-list pattern first, then a JSON array of job
/// records; otherwise the whole text is a plain message with no jobs.
pub fn extract_job_data(response_text: &str) -> AgentReply {
    let matches: Vec<JobRecord> = job_line_regex()
        .captures_iter(response_text)
        .map(|caps| JobRecord {
            title: caps[1].to_string(),
            company: caps[2].to_string(),
            url: caps[3].to_string(),
        })
        .collect();

    if !matches.is_empty() {
        return AgentReply {
            message: response_text.to_string(),
            jobs: Some(matches),
        };
    }

    // Fallback: the whole reply may be a bare JSON array of jobs
    if let Ok(jobs) = serde_json::from_str::<Vec<JobRecord>>(response_text.trim()) {
        let message = jobs
            .iter()
            .map(format_job_line)
            .collect::<Vec<_>>()
            .join("\n");
        return AgentReply {
            message,
            jobs: Some(jobs),
        };
    }

    AgentReply {
        message: response_text.to_string(),
        jobs: None,
    }
}

fn job_line_regex() -> &'static Regex {
    use std::sync::OnceLock;
    static JOB_LINE_RE: OnceLock<Regex> = OnceLock::new();
    JOB_LINE_RE.get_or_init(|| {
        Regex::new(r"-\s*\*\*(.*?)\*\* at (.*?)\s*-\s*\[Apply Here\]\((.*?)\)")
            .expect("Invalid regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_jobs() -> Vec<JobRecord> {
        vec![
            JobRecord {
                title: "Software Engineer".to_string(),
                company: "Tech Corp".to_string(),
                url: "https://example.com/job1".to_string(),
            },
            JobRecord {
                title: "Platform Engineer".to_string(),
                company: "Cloud Works".to_string(),
                url: "https://example.com/job2".to_string(),
            },
        ]
    }

    #[test]
    fn test_markdown_round_trip_is_idempotent() {
        let jobs = sample_jobs();
        let markdown = jobs.iter().map(format_job_line).collect::<Vec<_>>().join("\n");

        let reply = extract_job_data(&markdown);
        assert_eq!(reply.jobs, Some(jobs));
        assert_eq!(reply.message, markdown);
    }

    #[test]
    fn test_markdown_embedded_in_summary() {
        let text = "I found a couple of roles for you:\n\n\
                    - **Software Engineer** at Tech Corp - [Apply Here](https://example.com/job1)\n\
                    Good luck!";
        let reply = extract_job_data(text);
        let jobs = reply.jobs.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Tech Corp");
        // The surrounding summary text is preserved as-is
        assert_eq!(reply.message, text);
    }

    #[test]
    fn test_json_fallback() {
        let reply =
            extract_job_data(r#"[{"title":"A","company":"B","url":"http://x"}]"#);
        let jobs = reply.jobs.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "A");
        assert_eq!(jobs[0].company, "B");
        assert_eq!(
            reply.message,
            "- **A** at B - [Apply Here](http://x)"
        );
    }

    #[test]
    fn test_plain_text_passes_through() {
        let text = "Sorry, I could not find anything relevant today.";
        let reply = extract_job_data(text);
        assert!(reply.jobs.is_none());
        assert_eq!(reply.message, text);
    }
}
