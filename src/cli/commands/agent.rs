//! One-shot agent command implementation.

use crate::agent::response::extract_job_data;
use crate::agent::{Agent, ToolContext};
use crate::analytics::SearchAnalytics;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::resume::ResumeParser;
use anyhow::Result;
use std::sync::Arc;

/// Run the agent command.
pub async fn run_agent(
    task: &str,
    resume_file: Option<String>,
    model: Option<String>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Agent) {
        Output::error(&format!("{}", e));
        Output::info("Run 'jobscout doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let model = model.unwrap_or_else(|| settings.agent.model.clone());
    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    // Optional resume context for personalized results
    let context = match resume_file {
        Some(path) => {
            let file_bytes = std::fs::read(&path)?;
            let file_name = std::path::Path::new(&path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.clone());
            let parser = ResumeParser::new(&settings.resume, prompts.clone());
            let profile = parser.parse(&file_bytes, &file_name).await?;
            Some(profile.context_line())
        }
        None => None,
    };

    let analytics = Arc::new(SearchAnalytics::new());
    analytics.record_search();

    let tools = ToolContext::new(&settings, Arc::clone(&analytics))?;
    let agent = Agent::new(tools, &model)
        .with_system_prompt(&prompts.agent.system)
        .with_max_steps(settings.agent.max_steps);

    let spinner = Output::spinner("Agent working...");

    match agent.run(task, context.as_deref()).await {
        Ok(response) => {
            spinner.finish_and_clear();

            let reply = extract_job_data(&response.content);
            println!("\n{}\n", reply.message);

            if !response.tool_calls.is_empty() {
                Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
                for call in &response.tool_calls {
                    Output::info(&format!("  {} {}", call.name, truncate(&call.arguments, 60)));
                }
                println!();
            }

            Output::info(&format!("Completed in {} step(s)", response.steps));
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Agent failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
