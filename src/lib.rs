//! jobscout - AI Job Search Assistant
//!
//! A conversational CLI assistant for navigating the job market: an
//! LLM-driven agent that searches job boards, researches companies, parses
//! resumes, and tracks applications.
//!
//! # Overview
//!
//! jobscout allows you to:
//! - Chat with an agent that picks the right tool for each request
//! - Scrape job listings from LinkedIn, Naukri, and Indeed
//! - Research companies via web search and article extraction
//! - Extract a profile (role + skills) from a PDF/DOCX resume
//! - Save selected jobs to a Notion application tracker
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `boards` - Job board scraping adapters
//! - `research` - Company research adapter
//! - `resume` - Resume parsing adapter
//! - `tracker` - Application tracker adapter
//! - `agent` - Tool set, reasoning loop, and answer post-processing
//! - `analytics` - Session search analytics
//!
//! # Example
//!
//! ```rust,no_run
//! use jobscout::agent::{Agent, ToolContext};
//! use jobscout::analytics::SearchAnalytics;
//! use jobscout::config::Settings;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let analytics = Arc::new(SearchAnalytics::new());
//!     let tools = ToolContext::new(&settings, Arc::clone(&analytics))?;
//!
//!     let agent = Agent::new(tools, &settings.agent.model);
//!     let response = agent.run("Find Rust jobs in Berlin", None).await?;
//!     println!("{}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod analytics;
pub mod boards;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod research;
pub mod resume;
pub mod tracker;

pub use error::{Result, ScoutError};
