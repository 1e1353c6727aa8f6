//! Company research command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::research::CompanyResearcher;

/// Run the research command.
pub async fn run_research(company: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Research) {
        Output::error(&format!("{}", e));
        Output::info("Run 'jobscout doctor' for detailed diagnostics.");
        return Err(e);
    }

    let researcher = CompanyResearcher::new(&settings.research, &settings.search.user_agent)?;

    let spinner = Output::spinner(&format!("Researching {}...", company));
    let result = researcher.research(company).await;
    spinner.finish_and_clear();

    match result {
        Ok(text) => {
            Output::header(company);
            println!("{}\n", text);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            Err(e)
        }
    }
}
