use clap::ArgMatches;
use tracing::info;

use roost_core::{PickOutcome, session_ops};

use super::helpers::with_session_context;

pub(crate) fn handle_pick_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.pick_started");

    match with_session_context(matches, |ctx| session_ops::pick_project(ctx, Vec::new()))? {
        PickOutcome::Opened {
            project,
            outcome,
            cloned,
        } => {
            info!(
                event = "cli.pick_completed",
                project = project.as_str(),
                outcome = ?outcome,
                cloned = cloned
            );
        }
        PickOutcome::Extra { key } => {
            info!(event = "cli.pick_extra_ignored", key = key.as_str());
        }
        PickOutcome::Cancelled => {
            info!(event = "cli.pick_cancelled");
        }
    }

    Ok(())
}
