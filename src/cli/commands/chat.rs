//! Interactive chat command with tool calling support.

use crate::agent::response::{extract_job_data, JobRecord};
use crate::agent::{fallback, parse_tool_call, tool_definitions, ToolContext};
use crate::analytics::SearchAnalytics;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::error::{Result, ScoutError};
use crate::openai::create_client;
use crate::resume::ResumeParser;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestToolMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use console::style;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Run the interactive chat command.
pub async fn run_chat(
    model: Option<String>,
    resume_file: Option<String>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Agent) {
        Output::error(&format!("{}", e));
        Output::info("Run 'jobscout doctor' for detailed diagnostics.");
        return Err(e);
    }

    let model = model.unwrap_or_else(|| settings.agent.model.clone());
    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    // Resume upload personalizes the whole session
    let resume_context = match resume_file {
        Some(path) => analyze_resume(&path, &settings, &prompts).await,
        None => None,
    };

    let analytics = Arc::new(SearchAnalytics::new());
    let tools = ToolContext::new(&settings, Arc::clone(&analytics))?;

    let mut system_prompt = prompts.agent.system.clone();
    if let Some(ctx) = &resume_context {
        system_prompt.push_str("\n\n");
        system_prompt.push_str(ctx);
    }

    let mut chat = ChatSession::new(
        tools,
        &model,
        &system_prompt,
        settings.agent.max_steps,
        settings.agent.history_exchanges,
    );

    println!("\n{}", style("jobscout").bold().cyan());
    println!(
        "{}",
        style("Hello! How can I help you today? Ask me to find jobs, research companies, or track applications.").dim()
    );
    println!(
        "{}\n",
        style("Type 'exit' to quit, 'clear' to reset the conversation, 'stats' for search analytics.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Good luck with the search!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            chat.clear_history();
            Output::info("Conversation history cleared.");
            continue;
        }

        if input.eq_ignore_ascii_case("stats") {
            print_analytics(&analytics);
            continue;
        }

        // One submitted prompt is one search, no matter how many tool
        // calls the agent makes while answering it
        analytics.record_search();

        match chat.send_message(input).await {
            Ok(answer) => {
                let reply = extract_job_data(&answer);
                println!("\n{} {}\n", style("Agent:").cyan().bold(), reply.message);

                if let Some(jobs) = reply.jobs {
                    print_job_records(&jobs);
                }
            }
            Err(e) => {
                // Outermost catch-all: downgrade to a generic message and
                // keep the session alive
                error!("Error during agent execution: {}", e);
                Output::error("Sorry, I ran into a critical error. Please check the logs.");
            }
        }
    }

    Ok(())
}

/// Parse the resume file and return the agent context line, reporting
/// problems without aborting the session.
async fn analyze_resume(path: &str, settings: &Settings, prompts: &Prompts) -> Option<String> {
    if let Err(e) = preflight::check(Operation::Resume) {
        Output::error(&format!("{}", e));
        return None;
    }

    let file_bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            Output::error(&format!("Could not read resume file: {}", e));
            return None;
        }
    };
    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());

    let parser = ResumeParser::new(&settings.resume, prompts.clone());
    let spinner = Output::spinner("Analyzing your resume...");
    match parser.parse(&file_bytes, &file_name).await {
        Ok(profile) => {
            spinner.finish_and_clear();
            Output::success("Resume analyzed!");
            Output::kv("Role", &profile.job_role);
            Output::kv("Skills", &profile.skills.join(", "));
            println!();
            Some(profile.context_line())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Could not parse resume: {}", e));
            None
        }
    }
}

/// Print the structured job list with tracker hint.
fn print_job_records(jobs: &[JobRecord]) {
    Output::header(&format!("Jobs found ({})", jobs.len()));
    for (i, job) in jobs.iter().enumerate() {
        println!(
            "  {} {} at {}",
            style(format!("{}.", i + 1)).dim(),
            style(&job.title).bold(),
            job.company
        );
        println!("     {}", style(&job.url).dim());
    }
    println!(
        "\n{}\n",
        style("Ask me to save any of these to your tracker, e.g. \"save jobs 1 and 3\".").dim()
    );
}

/// Print the session analytics dashboard.
fn print_analytics(analytics: &SearchAnalytics) {
    let snap = analytics.snapshot();
    Output::header("Search Analytics");
    Output::kv("Total searches", &snap.total_searches.to_string());
    Output::kv("Successful searches", &snap.successful_searches.to_string());
    Output::kv("Failed searches", &snap.failed_searches.to_string());
    println!();
    println!("{}", style("Platform usage").bold());
    Output::kv("LinkedIn", &snap.platform_usage.linkedin.to_string());
    Output::kv("Naukri", &snap.platform_usage.naukri.to_string());
    Output::kv("Indeed", &snap.platform_usage.indeed.to_string());
    println!();
}

/// Interactive chat session with tool calling support.
///
/// Conversation memory is a bounded window of past exchanges; tool traffic
/// from earlier turns is not replayed into later LLM context.
struct ChatSession {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    tools: ToolContext,
    system_prompt: String,
    history: Vec<(String, String)>,
    max_steps: usize,
    history_exchanges: usize,
}

impl ChatSession {
    fn new(
        tools: ToolContext,
        model: &str,
        system_prompt: &str,
        max_steps: usize,
        history_exchanges: usize,
    ) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            tools,
            system_prompt: system_prompt.to_string(),
            history: Vec::new(),
            max_steps,
            history_exchanges,
        }
    }

    /// Forget all past exchanges (keeps the system prompt).
    fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Send a message and get a response, handling tool calls.
    async fn send_message(&mut self, user_input: &str) -> Result<String> {
        let mut messages = self.build_messages(user_input)?;

        let mut steps = 0;

        loop {
            steps += 1;
            if steps > self.max_steps {
                return Err(ScoutError::Agent(format!(
                    "Too many tool steps (limit {})",
                    self.max_steps
                )));
            }

            debug!("Chat step {}, {} messages", steps, messages.len());

            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.model)
                .messages(messages.clone())
                .tools(tool_definitions())
                .build()
                .map_err(|e| ScoutError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| ScoutError::OpenAI(format!("Chat API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| ScoutError::Agent("No response from model".to_string()))?;

            // Structured tool calls
            if let Some(tool_calls) = choice.message.tool_calls.as_ref().filter(|c| !c.is_empty()) {
                let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                    .tool_calls(tool_calls.clone())
                    .build()
                    .map_err(|e| ScoutError::Agent(e.to_string()))?;
                messages.push(assistant_msg.into());

                for tool_call in tool_calls {
                    let name = &tool_call.function.name;
                    let arguments = &tool_call.function.arguments;

                    info!("Chat calling tool: {} with args: {}", name, arguments);
                    print!("{}", style(format!("  [{}] ", name)).dim());
                    io::stdout().flush().ok();

                    let result = match parse_tool_call(name, arguments) {
                        Ok(tool) => match self.tools.execute(&tool).await {
                            Ok(output) => {
                                println!("{}", style("ok").green());
                                output
                            }
                            Err(e) => {
                                println!("{}", style("failed").red());
                                format!("Tool error: {}", e)
                            }
                        },
                        Err(e) => {
                            println!("{}", style("failed").red());
                            format!("Failed to parse tool call: {}", e)
                        }
                    };

                    let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                        .tool_call_id(&tool_call.id)
                        .content(result)
                        .build()
                        .map_err(|e| ScoutError::Agent(e.to_string()))?;
                    messages.push(tool_msg.into());
                }
                continue;
            }

            let content = choice.message.content.clone().unwrap_or_default();

            // Degraded mode: textual Action block in place of a function call
            if fallback::looks_like_action(&content) {
                let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                    .content(content.clone())
                    .build()
                    .map_err(|e| ScoutError::Agent(e.to_string()))?;
                messages.push(assistant_msg.into());

                let observation = match fallback::parse_textual_action(&content) {
                    Ok(action) => match self.tools.execute(&action.tool).await {
                        Ok(output) => output,
                        Err(e) => format!("Tool error: {}", e),
                    },
                    Err(e) => format!("Failed to parse tool call: {}", e),
                };
                messages.push(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(format!("Observation: {}", observation))
                        .build()
                        .map_err(|e| ScoutError::Agent(e.to_string()))?
                        .into(),
                );
                continue;
            }

            // Final answer: remember the exchange and trim the window
            self.history.push((user_input.to_string(), content.clone()));
            if self.history.len() > self.history_exchanges {
                let excess = self.history.len() - self.history_exchanges;
                self.history.drain(..excess);
            }

            return Ok(content);
        }
    }

    /// Rebuild the LLM context: system prompt, the retained exchanges,
    /// then the new user message.
    fn build_messages(&self, user_input: &str) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| ScoutError::Agent(e.to_string()))?
                .into(),
        ];

        for (user, assistant) in &self.history {
            messages.push(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user.clone())
                    .build()
                    .map_err(|e| ScoutError::Agent(e.to_string()))?
                    .into(),
            );
            messages.push(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(assistant.clone())
                    .build()
                    .map_err(|e| ScoutError::Agent(e.to_string()))?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_input.to_string())
                .build()
                .map_err(|e| ScoutError::Agent(e.to_string()))?
                .into(),
        );

        Ok(messages)
    }
}
