//! CLI module for jobscout.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// jobscout - AI job search assistant
///
/// A conversational CLI assistant for job search, company research,
/// resume analysis, and application tracking.
#[derive(Parser, Debug)]
#[command(name = "jobscout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize jobscout and verify system requirements
    Init,

    /// Check system requirements and configuration
    Doctor,

    /// Start an interactive chat session with the job search agent
    Chat {
        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Resume file (.pdf or .docx) to personalize the session
        #[arg(short, long)]
        resume: Option<String>,
    },

    /// Run the agent once on a task and print the answer
    Agent {
        /// The task for the agent (e.g. "Find Python jobs in Chennai")
        task: String,

        /// Resume file (.pdf or .docx) for personalized results
        #[arg(short, long)]
        resume: Option<String>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Search a job board directly, without the agent
    Search {
        /// Search query of the form "role, location"
        query: String,

        /// Board to search (linkedin, naukri, indeed); all boards if omitted
        #[arg(short, long)]
        board: Option<String>,

        /// Maximum listings to print per board
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Research a company and print a profile summary
    Research {
        /// The company name
        company: String,
    },

    /// Parse a resume file and print the extracted profile
    Resume {
        /// Path to the resume file (.pdf or .docx)
        file: String,
    },

    /// Save a JSON list of jobs to the application tracker
    Track {
        /// Path to a JSON file containing an array of job records
        file: String,
    },

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "agent.model")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
