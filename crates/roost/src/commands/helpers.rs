use clap::ArgMatches;
use tracing::{error, warn};

use roost_core::config::defaults::default_config;
use roost_core::config::{CURRENT_WORKSPACE, load_config, select_workspace};
use roost_core::errors::ConfigError;
use roost_core::events;
use roost_core::{
    Git2Inspector, GitCliCloner, Multiplexer, RoostConfig, SessionContext, SessionError,
    TmuxExecutor, TmuxMultiplexer, WorkspaceConfig, get_github_service, get_provider,
};

use roost_core::tmux::TmuxError;

use crate::picker::TerminalPicker;

/// Load the config file, falling back to defaults with a warning.
pub(crate) fn load_config_with_warning() -> RoostConfig {
    match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.roost/config.toml (or $ROOST_CONFIG_FILE) for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            default_config()
        }
    }
}

pub(crate) fn connect_tmux() -> Result<TmuxMultiplexer<TmuxExecutor>, TmuxError> {
    TmuxExecutor::locate().map(TmuxMultiplexer::new)
}

/// Resolve `-w`. The multiplexer is only asked for the attached session
/// when `-w current` was given.
pub(crate) fn resolve_workspace<'a>(
    config: &'a RoostConfig,
    matches: &ArgMatches,
    mux: Option<&dyn Multiplexer>,
) -> Result<(&'a str, &'a WorkspaceConfig), ConfigError> {
    let requested = matches.get_one::<String>("workspace").map(String::as_str);
    let attached = match requested {
        Some(CURRENT_WORKSPACE) => mux.and_then(|m| m.attached_session()),
        _ => None,
    };
    select_workspace(config, requested, attached.as_deref())
}

/// Load config and workspace without touching tmux unless `-w current` needs it.
pub(crate) fn workspace_only(
    matches: &ArgMatches,
) -> Result<(String, WorkspaceConfig), Box<dyn std::error::Error>> {
    let config = load_config_with_warning();
    let mux = connect_tmux().ok();
    match resolve_workspace(&config, matches, mux.as_ref().map(|m| m as &dyn Multiplexer)) {
        Ok((key, workspace)) => Ok((key.to_string(), workspace.clone())),
        Err(e) => Err(report("cli.workspace_failed", Box::new(e))),
    }
}

/// Build every collaborator for the selected workspace and run `flow`.
pub(crate) fn with_session_context<T>(
    matches: &ArgMatches,
    flow: impl FnOnce(&SessionContext<'_>) -> Result<T, SessionError>,
) -> Result<T, Box<dyn std::error::Error>> {
    let config = load_config_with_warning();

    let mux = match connect_tmux() {
        Ok(mux) => mux,
        Err(e) => {
            eprintln!("Tip: roost needs tmux on PATH.");
            return Err(report("cli.tmux_unavailable", Box::new(e)));
        }
    };

    let (_, workspace) = match resolve_workspace(&config, matches, Some(&mux)) {
        Ok(selected) => selected,
        Err(e) => return Err(report("cli.workspace_failed", Box::new(e))),
    };

    let remote = get_provider(workspace.remote_backend);
    let github = get_github_service();
    let ctx = SessionContext {
        workspace,
        presets: &config.session_presets,
        mux: &mux,
        git: &Git2Inspector,
        remote: remote.as_ref(),
        github: github.as_ref(),
        picker: &TerminalPicker,
        cloner: &GitCliCloner,
    };

    flow(&ctx).map_err(|e| report("cli.session_flow_failed", Box::new(e)))
}

/// Print an error for the user and log it.
pub(crate) fn report(
    event: &'static str,
    e: Box<dyn std::error::Error>,
) -> Box<dyn std::error::Error> {
    eprintln!("Error: {}", e);
    error!(event = event, error = %e);
    events::log_app_error(e.as_ref());
    e
}
