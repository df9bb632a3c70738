use clap::ArgMatches;
use tracing::error;

use roost_core::events;

pub mod helpers;

mod actions;
mod active;
mod cache;
mod close_all;
mod completions;
mod config;
mod filter;
mod new;
mod open;
mod pick;
mod prs;
mod search;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        None => pick::handle_pick_command(matches),
        Some(("pick", sub_matches)) => pick::handle_pick_command(sub_matches),
        Some(("open", sub_matches)) => open::handle_open_command(sub_matches),
        Some(("new", sub_matches)) => new::handle_new_command(sub_matches),
        Some(("search", sub_matches)) => search::handle_search_command(sub_matches),
        Some(("actions", sub_matches)) => actions::handle_actions_command(sub_matches),
        Some(("prs", sub_matches)) => prs::handle_prs_command(sub_matches),
        Some(("active", sub_matches)) => active::handle_active_command(sub_matches),
        Some(("close-all", sub_matches)) => close_all::handle_close_all_command(sub_matches),
        Some(("cache", sub_matches)) => cache::handle_cache_command(sub_matches),
        Some(("config", sub_matches)) => config::handle_config_command(sub_matches),
        Some(("filter", sub_matches)) => filter::handle_filter_command(sub_matches),
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
