use clap::ArgMatches;
use tracing::info;

use roost_core::tmux::session_filter;

use super::helpers::workspace_only;

/// Print the tmux format string for status-line integration.
pub(crate) fn handle_filter_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let (key, workspace) = workspace_only(matches)?;

    println!("{}", session_filter(&workspace.prefix));
    info!(event = "cli.filter_printed", workspace = key.as_str());
    Ok(())
}
