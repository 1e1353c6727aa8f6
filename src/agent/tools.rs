//! Tool definitions and implementations for the job search agent.
//!
//! Tools are a closed set of variants behind one contract: parse the
//! model's arguments into a [`ToolCall`], execute it against the adapters,
//! get back a textual observation or an error for the loop to stringify.

use crate::analytics::SearchAnalytics;
use crate::boards::{
    IndeedBoard, JobBoard, JobListing, LinkedinBoard, NaukriBoard, SearchQuery, NO_JOBS_MESSAGE,
};
use crate::config::Settings;
use crate::error::{Result, ScoutError};
use crate::research::CompanyResearcher;
use crate::tracker::NotionTracker;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Available tools for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Search for jobs on LinkedIn.
    LinkedinJobSearch { query: String },

    /// Search for jobs on Naukri.
    NaukriJobSearch { query: String },

    /// Search for jobs on Indeed.
    IndeedJobSearch { query: String },

    /// Research a company by name.
    CompanyResearcher { company: String },

    /// Save a JSON list of jobs to the application tracker.
    ApplicationTracker { jobs_json: String },

    /// Report the session's search analytics.
    GetSearchAnalytics,
}

impl ToolCall {
    /// The wire name the model uses to invoke this tool.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::LinkedinJobSearch { .. } => "linkedin_job_search",
            ToolCall::NaukriJobSearch { .. } => "naukri_job_search",
            ToolCall::IndeedJobSearch { .. } => "indeed_job_search",
            ToolCall::CompanyResearcher { .. } => "company_researcher",
            ToolCall::ApplicationTracker { .. } => "application_tracker",
            ToolCall::GetSearchAnalytics => "get_search_analytics",
        }
    }
}

/// Tool execution context wired to the external-service adapters.
pub struct ToolContext {
    linkedin: LinkedinBoard,
    naukri: NaukriBoard,
    indeed: IndeedBoard,
    researcher: CompanyResearcher,
    tracker: NotionTracker,
    analytics: Arc<SearchAnalytics>,
}

impl ToolContext {
    /// Build the tool context from settings, sharing the session's
    /// analytics collector.
    pub fn new(settings: &Settings, analytics: Arc<SearchAnalytics>) -> Result<Self> {
        Ok(Self {
            linkedin: LinkedinBoard::new(&settings.search)?,
            naukri: NaukriBoard::new(&settings.search),
            indeed: IndeedBoard::new(&settings.search)?,
            researcher: CompanyResearcher::new(&settings.research, &settings.search.user_agent)?,
            tracker: NotionTracker::new(&settings.tracker),
            analytics,
        })
    }

    /// Execute a tool call and return the observation as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::LinkedinJobSearch { query } => self.execute_board(&self.linkedin, query).await,
            ToolCall::NaukriJobSearch { query } => self.execute_board(&self.naukri, query).await,
            ToolCall::IndeedJobSearch { query } => self.execute_board(&self.indeed, query).await,
            ToolCall::CompanyResearcher { company } => self.researcher.research(company).await,
            ToolCall::ApplicationTracker { jobs_json } => self.tracker.save_jobs(jobs_json).await,
            ToolCall::GetSearchAnalytics => {
                let snapshot = self.analytics.snapshot();
                Ok(serde_json::to_string_pretty(&snapshot)?)
            }
        }
    }

    /// Run one board search, recording analytics around it.
    ///
    /// The query is parsed before any network work; a malformed query is
    /// reported without touching the board.
    async fn execute_board(&self, board: &dyn JobBoard, query: &str) -> Result<String> {
        self.analytics.record_platform(board.platform());

        let query = SearchQuery::parse(query)?;
        let outcome = board.search(&query).await;
        render_search_outcome(&self.analytics, outcome)
    }
}

/// Map a board result to the observation contract: listings render as
/// JSON, zero matches is the sentinel message, errors propagate for the
/// loop to stringify. Success/failure counters update here.
fn render_search_outcome(
    analytics: &SearchAnalytics,
    outcome: Result<Vec<JobListing>>,
) -> Result<String> {
    match outcome {
        Ok(jobs) if jobs.is_empty() => {
            analytics.record_failure();
            Ok(NO_JOBS_MESSAGE.to_string())
        }
        Ok(jobs) => {
            analytics.record_success();
            render_jobs(&jobs)
        }
        Err(e) => {
            analytics.record_failure();
            Err(e)
        }
    }
}

/// Render listings as an observation: a count line plus the records as
/// JSON, so the model can re-format or hand them to the tracker verbatim.
fn render_jobs(jobs: &[JobListing]) -> Result<String> {
    let platform = jobs[0].platform;
    let json = serde_json::to_string_pretty(jobs)?;
    Ok(format!("Found {} job(s) on {}:\n{}", jobs.len(), platform, json))
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    let query_parameters = serde_json::json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "Search query of the form 'role, location', e.g. 'Data Scientist, Chennai'"
            }
        },
        "required": ["query"]
    });

    vec![
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "linkedin_job_search".to_string(),
                description: Some(
                    "Search for job listings on LinkedIn. Input must be 'role, location'."
                        .to_string(),
                ),
                parameters: Some(query_parameters.clone()),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "naukri_job_search".to_string(),
                description: Some(
                    "Search for job listings on Naukri.com. Input must be 'role, location'. \
                    Slower than the other boards because the page needs a browser to render."
                        .to_string(),
                ),
                parameters: Some(query_parameters.clone()),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "indeed_job_search".to_string(),
                description: Some(
                    "Search for job listings on Indeed. Input must be 'role, location'."
                        .to_string(),
                ),
                parameters: Some(query_parameters),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "company_researcher".to_string(),
                description: Some(
                    "Research a specific company: returns the main text of the top web result \
                    for its company profile. Use before recommending a company to the user."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "company": {
                            "type": "string",
                            "description": "The company name"
                        }
                    },
                    "required": ["company"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "application_tracker".to_string(),
                description: Some(
                    "Save jobs to the user's application tracker. Only call when the user \
                    explicitly asks to save or track jobs."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "jobs_json": {
                            "type": "string",
                            "description": "A JSON array string of job objects, each with 'title', 'company' and 'url'"
                        }
                    },
                    "required": ["jobs_json"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "get_search_analytics".to_string(),
                description: Some(
                    "Get analytics about this session's job search history and performance."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {}
                })),
                strict: None,
            },
        },
    ]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = if arguments.trim().is_empty() {
        serde_json::json!({})
    } else {
        serde_json::from_str(arguments)
            .map_err(|e| ScoutError::Agent(format!("Invalid tool arguments: {}", e)))?
    };

    let string_arg = |key: &str| -> Result<String> {
        args[key]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ScoutError::Agent(format!("Missing '{}' argument", key)))
    };

    match name {
        "linkedin_job_search" => Ok(ToolCall::LinkedinJobSearch {
            query: string_arg("query")?,
        }),
        "naukri_job_search" => Ok(ToolCall::NaukriJobSearch {
            query: string_arg("query")?,
        }),
        "indeed_job_search" => Ok(ToolCall::IndeedJobSearch {
            query: string_arg("query")?,
        }),
        "company_researcher" => Ok(ToolCall::CompanyResearcher {
            company: string_arg("company")?,
        }),
        "application_tracker" => Ok(ToolCall::ApplicationTracker {
            jobs_json: string_arg("jobs_json")?,
        }),
        "get_search_analytics" => Ok(ToolCall::GetSearchAnalytics),
        _ => Err(ScoutError::Agent(format!("Unknown tool: {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::Platform;

    #[test]
    fn test_parse_board_tool() {
        let tool =
            parse_tool_call("linkedin_job_search", r#"{"query": "Engineer, Pune"}"#).unwrap();
        match tool {
            ToolCall::LinkedinJobSearch { query } => assert_eq!(query, "Engineer, Pune"),
            _ => panic!("Expected LinkedinJobSearch tool"),
        }
    }

    #[test]
    fn test_parse_analytics_tool_without_args() {
        let tool = parse_tool_call("get_search_analytics", "").unwrap();
        assert!(matches!(tool, ToolCall::GetSearchAnalytics));
    }

    #[test]
    fn test_parse_unknown_tool() {
        assert!(parse_tool_call("fax_machine", "{}").is_err());
    }

    #[test]
    fn test_parse_missing_argument() {
        assert!(parse_tool_call("company_researcher", "{}").is_err());
    }

    #[test]
    fn test_tool_names_round_trip_definitions() {
        let defined: Vec<String> = tool_definitions()
            .into_iter()
            .map(|t| t.function.name)
            .collect();
        for call in [
            ToolCall::LinkedinJobSearch { query: String::new() },
            ToolCall::NaukriJobSearch { query: String::new() },
            ToolCall::IndeedJobSearch { query: String::new() },
            ToolCall::CompanyResearcher { company: String::new() },
            ToolCall::ApplicationTracker { jobs_json: String::new() },
            ToolCall::GetSearchAnalytics,
        ] {
            assert!(defined.contains(&call.name().to_string()), "{}", call.name());
        }
    }

    #[test]
    fn test_render_jobs() {
        let jobs = vec![JobListing {
            platform: Platform::Indeed,
            title: "Dev".to_string(),
            company: "Acme".to_string(),
            url: "https://x".to_string(),
        }];
        let rendered = render_jobs(&jobs).unwrap();
        assert!(rendered.starts_with("Found 1 job(s) on Indeed:"));
        assert!(rendered.contains("\"company\": \"Acme\""));
    }

    #[test]
    fn test_search_outcome_sentinel_and_counters() {
        let analytics = SearchAnalytics::new();

        // Zero matches: sentinel message, counted as a failed search
        let observation = render_search_outcome(&analytics, Ok(vec![])).unwrap();
        assert_eq!(observation, NO_JOBS_MESSAGE);

        // Matches: rendered records, counted as a successful search
        let jobs = vec![JobListing {
            platform: Platform::LinkedIn,
            title: "Dev".to_string(),
            company: "Acme".to_string(),
            url: "https://x".to_string(),
        }];
        let observation = render_search_outcome(&analytics, Ok(jobs)).unwrap();
        assert!(observation.contains("\"title\": \"Dev\""));

        // Errors propagate and also count as failed
        let err = render_search_outcome(
            &analytics,
            Err(ScoutError::Board("page drift".to_string())),
        );
        assert!(err.is_err());

        let snap = analytics.snapshot();
        assert_eq!(snap.successful_searches, 1);
        assert_eq!(snap.failed_searches, 2);
        assert_eq!(snap.total_searches, 0);
    }
}
