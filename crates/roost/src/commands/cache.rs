use clap::ArgMatches;
use tracing::{error, info};

use roost_core::cache::{cache_stats, clear_cache};
use roost_core::events;

use super::helpers::workspace_only;

pub(crate) fn handle_cache_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("clear", sub_matches)) => handle_clear(sub_matches),
        Some(("status", sub_matches)) => handle_status(sub_matches),
        _ => {
            error!(event = "cli.cache.command_unknown");
            Err("Unknown cache command".into())
        }
    }
}

fn handle_clear(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let (key, workspace) = workspace_only(matches)?;
    let root = workspace.root();

    info!(event = "cli.cache.clear_started", workspace = key.as_str());

    match clear_cache(&root) {
        Ok(true) => println!("Cleared cache for workspace '{}'.", key),
        Ok(false) => println!("No cache for workspace '{}'.", key),
        Err(e) => {
            eprintln!("Error: {}", e);
            error!(event = "cli.cache.clear_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    }

    info!(event = "cli.cache.clear_completed", workspace = key.as_str());
    Ok(())
}

fn handle_status(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let (key, workspace) = workspace_only(matches)?;
    let stats = cache_stats(&workspace.root());

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Workspace:       {}", key);
    println!("Cache file:      {}", stats.path.display());
    if !stats.exists {
        println!("Status:          not created yet");
        return Ok(());
    }
    println!("Size:            {} bytes", stats.size_bytes);
    println!("Projects:        {}", stats.project_count);
    println!("Remote repos:    {}", stats.remote_repo_count);
    println!("Recent accesses: {}", stats.recent_access_count);
    match stats.last_updated {
        Some(at) => println!("Last updated:    {}", at.to_rfc3339()),
        None => println!("Last updated:    never"),
    }
    Ok(())
}
