use clap::ArgMatches;
use tracing::{info, warn};

use roost_core::session_ops;

use super::helpers::with_session_context;

pub(crate) fn handle_close_all_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.close_all_started");

    let summary = with_session_context(matches, session_ops::close_all_sessions)?;

    if summary.closed.is_empty() && summary.failed.is_empty() {
        println!("No sessions to close.");
    }
    for session in &summary.closed {
        println!("Closed {}", session);
    }
    for (session, message) in &summary.failed {
        eprintln!("Failed to close {}: {}", session, message);
        warn!(
            event = "cli.close_all_session_failed",
            session = session.as_str(),
            error = message.as_str()
        );
    }

    info!(
        event = "cli.close_all_completed",
        closed = summary.closed.len(),
        failed = summary.failed.len()
    );

    if summary.failed.is_empty() {
        Ok(())
    } else {
        Err(format!("{} session(s) could not be closed", summary.failed.len()).into())
    }
}
