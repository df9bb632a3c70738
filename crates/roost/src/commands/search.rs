use clap::ArgMatches;
use tracing::info;

use roost_core::{SearchOutcome, session_ops};

use super::helpers::with_session_context;

pub(crate) fn handle_search_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let terms = matches
        .get_many::<String>("terms")
        .ok_or("Search terms are required")?
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    info!(event = "cli.search_started", terms = terms.as_str());

    match with_session_context(matches, |ctx| session_ops::search_code(ctx, &terms))? {
        SearchOutcome::Opened {
            project,
            file,
            outcome,
            cloned,
        } => {
            info!(
                event = "cli.search_completed",
                project = project.as_str(),
                file = file.as_str(),
                outcome = ?outcome,
                cloned = cloned
            );
        }
        SearchOutcome::NoResults => {
            println!("No code matches '{}'.", terms);
            info!(event = "cli.search_no_results");
        }
        SearchOutcome::Cancelled => {
            info!(event = "cli.search_cancelled");
        }
    }
    Ok(())
}
