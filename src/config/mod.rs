//! Configuration module for jobscout.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AgentPrompts, Prompts, ResumePrompts};
pub use settings::{
    AgentSettings, GeneralSettings, PromptSettings, ResearchSettings, ResumeSettings,
    SearchSettings, Settings, TrackerSettings,
};
