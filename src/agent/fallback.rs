//! Textual tool-invocation fallback parser.
//!
//! Structured function calling is the primary invocation path. Some models
//! (or misconfigured endpoints) answer with a free-form ReAct block instead:
//!
//! ```text
//! Thought: I should search LinkedIn
//! Action: linkedin_job_search
//! Action Input: Software Engineer, Bengaluru
//! ```
//!
//! This module is the isolated boundary adapter for that degraded mode. It
//! only recognizes the Action/Action Input shape; anything else is treated
//! as a final answer by the caller.

use super::tools::{parse_tool_call, ToolCall};
use crate::error::{Result, ScoutError};
use regex::Regex;

/// A parsed textual action: the tool plus the raw input string.
#[derive(Debug, Clone)]
pub struct TextualAction {
    pub tool: ToolCall,
    pub raw_input: String,
}

/// Check whether a reply looks like a textual action block at all.
pub fn looks_like_action(content: &str) -> bool {
    action_regex().is_match(content)
}

/// Parse an Action/Action Input block out of free-form model output.
///
/// Returns an error (surfaced as an observation, never fatal) when the
/// block is malformed or names an unknown tool.
pub fn parse_textual_action(content: &str) -> Result<TextualAction> {
    let captures = action_regex()
        .captures(content)
        .ok_or_else(|| ScoutError::Agent("No Action block found in reply".to_string()))?;

    let name = captures
        .name("name")
        .map(|m| m.as_str().trim())
        .unwrap_or_default();
    let raw_input = captures
        .name("input")
        .map(|m| m.as_str().trim().trim_matches('"').to_string())
        .unwrap_or_default();

    // Textual inputs are a bare string; wrap them into the argument the
    // structured parser expects for each tool.
    let arguments = match name {
        "company_researcher" => serde_json::json!({ "company": raw_input }),
        "application_tracker" => serde_json::json!({ "jobs_json": raw_input }),
        "get_search_analytics" => serde_json::json!({}),
        _ => serde_json::json!({ "query": raw_input }),
    };

    let tool = parse_tool_call(name, &arguments.to_string())?;
    Ok(TextualAction { tool, raw_input })
}

fn action_regex() -> &'static Regex {
    use std::sync::OnceLock;
    static ACTION_RE: OnceLock<Regex> = OnceLock::new();
    ACTION_RE.get_or_init(|| {
        Regex::new(r"Action:[ \t]*(?P<name>[\w-]+)[ \t]*\r?\n[ \t]*Action Input:[ \t]*(?P<input>[^\r\n]*)")
            .expect("Invalid regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_board_action() {
        let content = "Thought: search first\nAction: naukri_job_search\nAction Input: Data Scientist, Chennai";
        let action = parse_textual_action(content).unwrap();
        assert_eq!(action.raw_input, "Data Scientist, Chennai");
        match action.tool {
            ToolCall::NaukriJobSearch { query } => assert_eq!(query, "Data Scientist, Chennai"),
            other => panic!("Expected NaukriJobSearch, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_researcher_action() {
        let content = "Action: company_researcher\nAction Input: \"Acme Corp\"";
        let action = parse_textual_action(content).unwrap();
        match action.tool {
            ToolCall::CompanyResearcher { company } => assert_eq!(company, "Acme Corp"),
            other => panic!("Expected CompanyResearcher, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tool_is_error_not_panic() {
        let content = "Action: teleport\nAction Input: anywhere";
        assert!(looks_like_action(content));
        assert!(parse_textual_action(content).is_err());
    }

    #[test]
    fn test_plain_answer_is_not_action() {
        assert!(!looks_like_action("Here are some jobs I found for you."));
        assert!(parse_textual_action("final answer").is_err());
    }
}
