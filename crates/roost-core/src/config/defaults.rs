//! Built-in defaults used when no config file exists and by `roost config init`.

use std::collections::BTreeMap;

use super::types::{
    Orientation, PaneConfig, RemoteBackend, RoostConfig, SessionPreset, WindowConfig,
    WorkspaceConfig,
};

/// Default size of the sliding recent-access window.
pub const DEFAULT_RECENT_ACCESS_WINDOW: usize = 50;

/// Name of the preset the default workspace points at.
pub const DEFAULT_PRESET: &str = "default";

pub fn default_config() -> RoostConfig {
    let mut workspaces = BTreeMap::new();
    workspaces.insert(
        "ws".to_string(),
        WorkspaceConfig {
            name: "Projects".to_string(),
            prefix: "ws".to_string(),
            path: "~/Projects".to_string(),
            session_preset: Some(DEFAULT_PRESET.to_string()),
            active_projects_first: true,
            enable_git_info: true,
            enable_remote_repos: false,
            remote_backend: RemoteBackend::Api,
            enable_cache: true,
            enable_usage_tracking: true,
            recent_access_window: Some(DEFAULT_RECENT_ACCESS_WINDOW),
            ..Default::default()
        },
    );

    let mut session_presets = BTreeMap::new();
    session_presets.insert(
        DEFAULT_PRESET.to_string(),
        SessionPreset {
            path: None,
            windows: vec![WindowConfig {
                name: "code".to_string(),
                layout: Some("main-vertical".to_string()),
                path: None,
                panes: vec![
                    PaneConfig {
                        command: "nvim".to_string(),
                        ..Default::default()
                    },
                    PaneConfig {
                        command: String::new(),
                        orientation: Some(Orientation::Horizontal),
                        size: Some(30),
                        path: None,
                    },
                ],
            }],
        },
    );

    RoostConfig {
        default_workspace: Some("ws".to_string()),
        workspaces,
        session_presets,
    }
}
