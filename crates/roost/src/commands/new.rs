use clap::ArgMatches;
use tracing::info;

use roost_core::{NewProjectOptions, session_ops};

use super::helpers::with_session_context;

pub(crate) fn handle_new_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let name = matches
        .get_one::<String>("name")
        .ok_or("Project name is required")?;
    let options = NewProjectOptions {
        publish: matches.get_flag("gh"),
        private: matches.get_flag("private"),
    };

    info!(
        event = "cli.new_started",
        name = name.as_str(),
        publish = options.publish,
        private = options.private
    );

    let result = with_session_context(matches, |ctx| {
        session_ops::create_project(ctx, name, options)
    })?;

    info!(
        event = "cli.new_completed",
        project = result.project.as_str(),
        session = result.session.as_str(),
        outcome = ?result.outcome
    );
    Ok(())
}
