//! Error types for jobscout.

use thiserror::Error;

/// Library-level error type for jobscout operations.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    InvalidInput(String),

    #[error("Job board error: {0}")]
    Board(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Article extraction error: {0}")]
    Article(String),

    #[error("Resume error: {0}")]
    Resume(String),

    #[error("Tracker error: {0}")]
    Tracker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

/// Result type alias for jobscout operations.
pub type Result<T> = std::result::Result<T, ScoutError>;
