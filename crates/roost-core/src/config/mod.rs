//! # Configuration System
//!
//! TOML configuration for roost, read from `~/.roost/config.toml`
//! (or `$ROOST_CONFIG_FILE`). A missing file means built-in defaults.
//!
//! A config holds named workspaces (a root directory of projects plus
//! feature toggles) and named session presets (window/pane layouts).

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

use std::path::PathBuf;

pub use loading::{
    CURRENT_WORKSPACE, config_file_path, load_config, load_config_from, select_workspace,
    write_default_config,
};
pub use types::{
    Orientation, PaneConfig, RemoteBackend, RoostConfig, SessionPreset, WindowConfig,
    WorkspaceConfig,
};
pub use validation::validate_config;

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
