use clap::ArgMatches;
use tracing::info;

use roost_core::session_ops;

use super::helpers::with_session_context;

pub(crate) fn handle_open_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let selector = matches
        .get_one::<String>("project")
        .ok_or("Project argument is required")?;

    info!(event = "cli.open_started", selector = selector.as_str());

    let result = with_session_context(matches, |ctx| session_ops::open_project(ctx, selector))?;

    info!(
        event = "cli.open_completed",
        project = result.project.as_str(),
        session = result.session.as_str(),
        outcome = ?result.outcome,
        cloned = result.cloned
    );
    Ok(())
}
