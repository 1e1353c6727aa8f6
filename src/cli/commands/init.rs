//! Init command - interactive first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("jobscout Setup");
    println!();
    println!("Welcome to jobscout! Let's make sure everything is configured correctly.\n");

    // Step 1: LLM API key
    println!("{}", style("Step 1: Checking the LLM API key").bold().cyan());
    println!();

    if std::env::var("OPENAI_API_KEY").is_err() {
        Output::warning("OPENAI_API_KEY environment variable is not set.");
        println!();
        println!("  jobscout needs an API key for the agent and resume parsing.");
        println!("  Set it in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        println!("  {}", style("export OPENAI_API_KEY='sk-...'").green());
        println!();

        if !prompt_continue("Continue without API key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'jobscout init' again.");
            return Ok(());
        }
    } else {
        Output::success("LLM API key is configured!");
    }

    println!();

    // Step 2: optional service keys
    println!("{}", style("Step 2: Optional services").bold().cyan());
    println!();

    if std::env::var("SERPAPI_API_KEY").is_err() {
        Output::warning("SERPAPI_API_KEY is not set; company research will be unavailable.");
        println!(
            "  Get a key from {}",
            style("https://serpapi.com/").underlined()
        );
    } else {
        Output::success("SerpAPI key is configured!");
    }

    if std::env::var("NOTION_API_TOKEN").is_err() || std::env::var("NOTION_DATABASE_ID").is_err() {
        Output::warning(
            "NOTION_API_TOKEN / NOTION_DATABASE_ID are not both set; application tracking will be unavailable.",
        );
    } else {
        Output::success("Notion tracker is configured!");
    }

    println!();

    // Step 3: headless browser
    println!("{}", style("Step 3: Headless browser").bold().cyan());
    println!();

    let browser = &settings.search.browser_binary;
    if std::process::Command::new(browser)
        .arg("--version")
        .output()
        .is_err()
    {
        Output::warning(&format!(
            "'{}' not found; Naukri searches need Chromium or Chrome.",
            browser
        ));
        println!(
            "    {} {}",
            style("→").dim(),
            style("Install with: sudo apt install chromium (or brew install chromium)").dim()
        );
    } else {
        Output::success("Headless browser is available!");
    }

    println!();

    // Step 4: Create config file
    println!("{}", style("Step 4: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
        println!();
        println!("  Edit your config with: {}", style("jobscout config edit").green());
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Check system status", style("jobscout doctor").cyan());
    println!(
        "  {} Chat with the job search agent",
        style("jobscout chat").cyan()
    );
    println!(
        "  {} Search a board directly",
        style("jobscout search \"Data Scientist, Chennai\"").cyan()
    );
    println!();
    println!("For more help: {}", style("jobscout --help").cyan());

    Ok(())
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", style("?").cyan(), message);
    print!("{} ", style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y" || input.trim().to_lowercase() == "yes")
}
