//! Job search agent: tool set, reasoning loop, and answer post-processing.

pub mod fallback;
pub mod response;
mod runner;
mod tools;

pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext};
