//! Agent runner: an explicit think/act state machine over the tool set.
//!
//! One run answers one user task. The loop is bounded by a step budget;
//! every tool outcome (including errors and fallback parse failures) goes
//! back to the model as a textual observation, so a run can only end in
//! `Done` or `Failed`, never a crash.

use super::fallback;
use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use crate::config::Prompts;
use crate::error::{Result, ScoutError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestToolMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use tracing::{debug, info};

/// States of the reasoning loop.
#[derive(Debug)]
enum AgentState {
    /// Waiting on the model for the next tool choice or final answer.
    Thinking,
    /// Executing the tool invocations the model asked for.
    ActingOnTool(Vec<Invocation>),
    /// The model produced a final answer.
    Done(String),
    /// The loop cannot continue (step budget exhausted, no model reply).
    Failed(String),
}

/// One pending tool invocation, from either invocation path.
#[derive(Debug)]
enum Invocation {
    /// Structured function call; the observation is returned as a tool
    /// message tied to the call id.
    Structured {
        id: String,
        name: String,
        arguments: String,
    },
    /// Textual Action/Action Input fallback; the observation is returned
    /// as a plain user message.
    Textual {
        tool: super::tools::ToolCall,
        raw_input: String,
    },
}

/// Agent that answers job-search tasks with the adapter tool set.
pub struct Agent {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    tools: ToolContext,
    max_steps: usize,
    system_prompt: String,
}

impl Agent {
    /// Create a new agent with the given tool context and model.
    pub fn new(tools: ToolContext, model: &str) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            tools,
            max_steps: 10,
            system_prompt: Prompts::default().agent.system,
        }
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = prompt.to_string();
        self
    }

    /// Set the step budget for the loop.
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    /// Run the agent on a user task, with optional context (e.g. the
    /// resume profile line).
    pub async fn run(&self, task: &str, context: Option<&str>) -> Result<AgentResponse> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| ScoutError::Agent(e.to_string()))?
                .into(),
        ];

        let user_message = match context {
            Some(ctx) => format!("Context: {}\n\nTask: {}", ctx, task),
            None => task.to_string(),
        };
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()
                .map_err(|e| ScoutError::Agent(e.to_string()))?
                .into(),
        );

        let mut state = AgentState::Thinking;
        let mut steps = 0usize;
        let mut tool_calls_made = Vec::new();

        loop {
            state = match state {
                AgentState::Thinking => {
                    steps += 1;
                    if steps > self.max_steps {
                        AgentState::Failed(format!(
                            "Agent exceeded maximum steps ({})",
                            self.max_steps
                        ))
                    } else {
                        debug!("Agent step {}", steps);
                        self.think(&mut messages).await?
                    }
                }
                AgentState::ActingOnTool(invocations) => {
                    for invocation in invocations {
                        let record = self.invoke(&invocation).await;
                        self.push_observation(&mut messages, &invocation, &record.result)?;
                        tool_calls_made.push(record);
                    }
                    AgentState::Thinking
                }
                AgentState::Done(content) => {
                    return Ok(AgentResponse {
                        content,
                        tool_calls: tool_calls_made,
                        steps,
                    })
                }
                AgentState::Failed(reason) => return Err(ScoutError::Agent(reason)),
            };
        }
    }

    /// Ask the model for the next move and classify its reply.
    async fn think(
        &self,
        messages: &mut Vec<ChatCompletionRequestMessage>,
    ) -> Result<AgentState> {
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
            .map_err(|e| ScoutError::OpenAI(format!("Agent API error: {}", e)))?;

        let Some(choice) = response.choices.first() else {
            return Ok(AgentState::Failed("No response from model".to_string()));
        };

        // Primary path: structured tool calls
        if let Some(tool_calls) = choice.message.tool_calls.as_ref().filter(|c| !c.is_empty()) {
            let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                .tool_calls(tool_calls.clone())
                .build()
                .map_err(|e| ScoutError::Agent(e.to_string()))?;
            messages.push(assistant_msg.into());

            let invocations = tool_calls
                .iter()
                .map(|call| Invocation::Structured {
                    id: call.id.clone(),
                    name: call.function.name.clone(),
                    arguments: call.function.arguments.clone(),
                })
                .collect();
            return Ok(AgentState::ActingOnTool(invocations));
        }

        let content = choice.message.content.clone().unwrap_or_default();

        // Degraded mode: a textual Action block instead of a function call
        if fallback::looks_like_action(&content) {
            let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                .content(content.clone())
                .build()
                .map_err(|e| ScoutError::Agent(e.to_string()))?;
            messages.push(assistant_msg.into());

            return match fallback::parse_textual_action(&content) {
                Ok(action) => Ok(AgentState::ActingOnTool(vec![Invocation::Textual {
                    tool: action.tool,
                    raw_input: action.raw_input,
                }])),
                Err(e) => {
                    // Surface the parse failure and let the model retry;
                    // the step budget bounds how long this can go on.
                    let observation = format!("Observation: Failed to parse tool call: {}", e);
                    messages.push(
                        ChatCompletionRequestUserMessageArgs::default()
                            .content(observation)
                            .build()
                            .map_err(|e| ScoutError::Agent(e.to_string()))?
                            .into(),
                    );
                    Ok(AgentState::Thinking)
                }
            };
        }

        // No tool call and no action block: this is the final answer
        Ok(AgentState::Done(content))
    }

    /// Execute one invocation, converting every failure into an
    /// observation string.
    async fn invoke(&self, invocation: &Invocation) -> ToolCallRecord {
        let (name, arguments, result) = match invocation {
            Invocation::Structured { name, arguments, .. } => {
                info!("Agent calling tool: {} with args: {}", name, arguments);
                let result = match parse_tool_call(name, arguments) {
                    Ok(tool) => match self.tools.execute(&tool).await {
                        Ok(output) => output,
                        Err(e) => format!("Tool error: {}", e),
                    },
                    Err(e) => format!("Failed to parse tool call: {}", e),
                };
                (name.clone(), arguments.clone(), result)
            }
            Invocation::Textual { tool, raw_input } => {
                info!("Agent calling tool (textual): {} with input: {}", tool.name(), raw_input);
                let result = match self.tools.execute(tool).await {
                    Ok(output) => output,
                    Err(e) => format!("Tool error: {}", e),
                };
                (tool.name().to_string(), raw_input.clone(), result)
            }
        };

        ToolCallRecord {
            name,
            arguments,
            result,
        }
    }

    /// Feed a tool observation back into the conversation.
    fn push_observation(
        &self,
        messages: &mut Vec<ChatCompletionRequestMessage>,
        invocation: &Invocation,
        result: &str,
    ) -> Result<()> {
        match invocation {
            Invocation::Structured { id, .. } => {
                let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                    .tool_call_id(id)
                    .content(result.to_string())
                    .build()
                    .map_err(|e| ScoutError::Agent(e.to_string()))?;
                messages.push(tool_msg.into());
            }
            Invocation::Textual { .. } => {
                let user_msg = ChatCompletionRequestUserMessageArgs::default()
                    .content(format!("Observation: {}", result))
                    .build()
                    .map_err(|e| ScoutError::Agent(e.to_string()))?;
                messages.push(user_msg.into());
            }
        }
        Ok(())
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final answer from the agent.
    pub content: String,
    /// Record of all tool calls made during the run.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of think steps (LLM calls) used.
    pub steps: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// Arguments (JSON for structured calls, raw input for textual ones).
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_call_record_display() {
        let record = ToolCallRecord {
            name: "linkedin_job_search".to_string(),
            arguments: r#"{"query": "Engineer, Pune"}"#.to_string(),
            result: "Found 3 job(s)".to_string(),
        };
        assert_eq!(
            format!("{}", record),
            r#"linkedin_job_search({"query": "Engineer, Pune"})"#
        );
    }
}
