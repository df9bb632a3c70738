use clap::ArgMatches;
use tracing::info;

use roost_core::sessions::DEFAULT_WORKFLOW;
use roost_core::{Git2Inspector, get_github_service, session_ops};

use super::helpers::{report, workspace_only};

pub(crate) fn handle_actions_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let project = matches
        .get_one::<String>("project")
        .ok_or("Project argument is required")?;
    let workflow = matches
        .get_one::<String>("workflow")
        .map(String::as_str)
        .unwrap_or(DEFAULT_WORKFLOW);
    let json_output = matches.get_flag("json");

    info!(
        event = "cli.actions_started",
        project = project.as_str(),
        workflow = workflow
    );

    let (_, workspace) = workspace_only(matches)?;
    let github = get_github_service();
    let statuses = session_ops::workflow_status(
        &workspace,
        &Git2Inspector,
        github.as_ref(),
        project,
        workflow,
    )
    .map_err(|e| report("cli.actions_failed", Box::new(e)))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
    } else {
        let branches: Vec<&str> = statuses.iter().map(|s| s.branch.as_str()).collect();
        println!("Branches: {}", branches.join(", "));
        for status in &statuses {
            println!("{}", status);
        }
    }

    info!(
        event = "cli.actions_completed",
        project = project.as_str(),
        branches = statuses.len()
    );
    Ok(())
}
