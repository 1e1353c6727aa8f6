//! Resume parsing command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::resume::ResumeParser;

/// Run the resume command.
pub async fn run_resume(file: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Resume) {
        Output::error(&format!("{}", e));
        Output::info("Run 'jobscout doctor' for detailed diagnostics.");
        return Err(e);
    }

    let file_bytes = std::fs::read(file)?;
    let file_name = std::path::Path::new(file)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let parser = ResumeParser::new(&settings.resume, prompts);

    let spinner = Output::spinner("Analyzing resume...");
    let result = parser.parse(&file_bytes, &file_name).await;
    spinner.finish_and_clear();

    match result {
        Ok(profile) => {
            Output::success("Resume analyzed!");
            Output::kv("Role", &profile.job_role);
            Output::kv("Skills", &profile.skills.join(", "));
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            Err(e)
        }
    }
}
