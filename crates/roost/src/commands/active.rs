use clap::ArgMatches;
use tracing::info;

use roost_core::{ActiveOutcome, session_ops};

use super::helpers::with_session_context;

pub(crate) fn handle_active_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.active_started");

    let (outcome, workspace) = with_session_context(matches, |ctx| {
        let outcome = session_ops::choose_active_session(ctx)?;
        Ok((outcome, ctx.workspace.name.clone()))
    })?;

    match outcome {
        ActiveOutcome::Attached { session } => {
            info!(event = "cli.active_attached", session = session.as_str());
        }
        ActiveOutcome::NoneActive => {
            println!("No open projects in workspace '{}'.", workspace);
            info!(event = "cli.active_none");
        }
        ActiveOutcome::Cancelled => {
            info!(event = "cli.active_cancelled");
        }
    }
    Ok(())
}
