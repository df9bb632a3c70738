use clap::ArgMatches;
use tracing::{error, info};

use roost_core::config::{config_file_path, write_default_config};
use roost_core::events;

pub(crate) fn handle_config_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let path = config_file_path()?;

    match matches.subcommand_name() {
        Some("init") => {
            if let Err(e) = write_default_config(&path) {
                eprintln!("Error: {}", e);
                eprintln!("Tip: Edit the existing file or remove it first.");
                error!(event = "cli.config.init_failed", error = %e);
                events::log_app_error(&e);
                return Err(e.into());
            }
            println!("Wrote default config to {}", path.display());
            info!(event = "cli.config.init_completed", path = %path.display());
            Ok(())
        }
        Some("path") => {
            println!("{}", path.display());
            Ok(())
        }
        _ => {
            error!(event = "cli.config.command_unknown");
            Err("Unknown config command".into())
        }
    }
}
