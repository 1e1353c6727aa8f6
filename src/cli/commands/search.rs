//! Direct job board search command, bypassing the agent.

use crate::boards::{
    IndeedBoard, JobBoard, JobListing, LinkedinBoard, NaukriBoard, Platform, SearchQuery,
    NO_JOBS_MESSAGE,
};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use console::style;

/// Run the search command against one board, or all of them.
pub async fn run_search(
    query: &str,
    board: Option<String>,
    limit: usize,
    settings: Settings,
) -> Result<()> {
    // Parse before anything else; a malformed query never goes online
    let query = SearchQuery::parse(query)?;

    let explicit_board = board.is_some();
    let mut platforms: Vec<Platform> = match board {
        Some(name) => vec![name.parse()?],
        None => Platform::ALL.to_vec(),
    };

    if platforms.contains(&Platform::Naukri) {
        if let Err(e) = preflight::check(Operation::Browser(settings.search.browser_binary.clone()))
        {
            if explicit_board {
                Output::error(&format!("{}", e));
                return Err(e);
            }
            Output::warning(&format!("Skipping Naukri: {}", e));
            platforms.retain(|p| *p != Platform::Naukri);
        }
    }

    let boards = build_boards(&platforms, &settings)?;

    let spinner = Output::spinner(&format!(
        "Searching for '{}' in '{}'...",
        query.role, query.location
    ));
    let results = futures::future::join_all(
        boards.iter().map(|board| board.search(&query)),
    )
    .await;
    spinner.finish_and_clear();

    for (board, result) in boards.iter().zip(results) {
        println!("\n{}", style(board.platform().to_string()).bold().underlined());
        match result {
            Ok(jobs) if jobs.is_empty() => Output::info(NO_JOBS_MESSAGE),
            Ok(jobs) => print_jobs(&jobs, limit),
            Err(e) => Output::error(&format!("{}", e)),
        }
    }
    println!();

    Ok(())
}

fn build_boards(platforms: &[Platform], settings: &Settings) -> Result<Vec<Box<dyn JobBoard>>> {
    let mut boards: Vec<Box<dyn JobBoard>> = Vec::new();
    for platform in platforms {
        match platform {
            Platform::LinkedIn => boards.push(Box::new(LinkedinBoard::new(&settings.search)?)),
            Platform::Naukri => boards.push(Box::new(NaukriBoard::new(&settings.search))),
            Platform::Indeed => boards.push(Box::new(IndeedBoard::new(&settings.search)?)),
        }
    }
    Ok(boards)
}

fn print_jobs(jobs: &[JobListing], limit: usize) {
    for (i, job) in jobs.iter().take(limit).enumerate() {
        Output::job_listing(i + 1, job);
    }
    if jobs.len() > limit {
        Output::info(&format!("...and {} more", jobs.len() - limit));
    }
}
