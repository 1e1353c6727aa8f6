//! Application tracker command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::tracker::NotionTracker;

/// Run the track command: save a JSON file of jobs to the tracker.
pub async fn run_track(file: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Track) {
        Output::error(&format!("{}", e));
        Output::info("Run 'jobscout doctor' for detailed diagnostics.");
        return Err(e);
    }

    let jobs_json = std::fs::read_to_string(file)?;

    let tracker = NotionTracker::new(&settings.tracker);

    let spinner = Output::spinner("Saving to your tracker...");
    let result = tracker.save_jobs(&jobs_json).await;
    spinner.finish_and_clear();

    match result {
        Ok(message) => {
            Output::success(&message);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            Err(e)
        }
    }
}
