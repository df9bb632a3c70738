use clap::ArgMatches;
use tracing::info;

use roost_core::{Git2Inspector, get_github_service, session_ops};

use super::helpers::{report, workspace_only};

pub(crate) fn handle_prs_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let project = matches
        .get_one::<String>("project")
        .ok_or("Project argument is required")?;
    let branch = matches.get_one::<String>("branch").map(String::as_str);
    let json_output = matches.get_flag("json");

    info!(
        event = "cli.prs_started",
        project = project.as_str(),
        branch = branch
    );

    let (_, workspace) = workspace_only(matches)?;
    let github = get_github_service();
    let (branch, pulls) = session_ops::open_pull_requests(
        &workspace,
        &Git2Inspector,
        github.as_ref(),
        project,
        branch,
    )
    .map_err(|e| report("cli.prs_failed", Box::new(e)))?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "branch": branch,
                "pulls": pulls,
            }))?
        );
    } else if pulls.is_empty() {
        println!("No open PR for branch '{}'", branch);
    } else {
        for pr in &pulls {
            let draft = if pr.draft { " (draft)" } else { "" };
            println!("PR #{}: {}{}", pr.number, pr.title, draft);
            println!("  {} by {}", pr.url, pr.author);
        }
    }

    info!(
        event = "cli.prs_completed",
        project = project.as_str(),
        branch = branch.as_str(),
        count = pulls.len()
    );
    Ok(())
}
