//! Resolution of a workspace's session layout into a concrete plan.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::config::types::resolve_against;
use crate::config::{Orientation, SessionPreset, WorkspaceConfig};

use super::errors::LayoutError;
use super::types::{PanePlan, ProjectSelector, SessionLayoutPlan, WindowPlan};

/// Pane commands that receive the selector's file and extra arguments.
pub const EDITOR_COMMANDS: &[&str] = &["vi", "vim", "nvim"];

fn select_preset<'a>(
    workspace: &'a WorkspaceConfig,
    presets: &'a BTreeMap<String, SessionPreset>,
) -> Result<(&'a str, &'a SessionPreset), LayoutError> {
    if let Some(name) = workspace.session_preset.as_deref().filter(|n| !n.is_empty()) {
        return presets
            .get(name)
            .map(|preset| (name, preset))
            .ok_or_else(|| LayoutError::PresetNotFound {
                name: name.to_string(),
            });
    }

    workspace
        .session
        .as_ref()
        .map(|preset| ("inline", preset))
        .ok_or_else(|| LayoutError::NoLayout {
            workspace: workspace.name.clone(),
        })
}

fn editor_command(command: &str, selector: &ProjectSelector) -> String {
    if !EDITOR_COMMANDS.contains(&command) {
        return command.to_string();
    }

    let mut command = command.to_string();
    if let Some(file) = &selector.file {
        command.push_str(" ./");
        command.push_str(file);
    }
    if let Some(extra) = &selector.extra {
        command.push(' ');
        command.push_str(extra);
    }
    command
}

/// Build the plan for `selector.project` rooted at `project_path`.
pub fn resolve_layout(
    workspace: &WorkspaceConfig,
    presets: &BTreeMap<String, SessionPreset>,
    selector: &ProjectSelector,
    project_path: &Path,
) -> Result<SessionLayoutPlan, LayoutError> {
    let (preset_name, preset) = select_preset(workspace, presets)?;

    if preset.windows.is_empty() {
        return Err(LayoutError::EmptyLayout {
            name: preset_name.to_string(),
        });
    }

    let base_path = match &preset.path {
        Some(path) => resolve_against(project_path, path),
        None => project_path.to_path_buf(),
    };

    let windows = preset
        .windows
        .iter()
        .map(|window| {
            let window_path = match &window.path {
                Some(path) => resolve_against(&base_path, path),
                None => base_path.clone(),
            };

            let panes = window
                .panes
                .iter()
                .map(|pane| PanePlan {
                    command: editor_command(&pane.command, selector),
                    orientation: pane.orientation.unwrap_or(Orientation::Horizontal),
                    size: pane.size.filter(|s| (1..=99).contains(s)),
                    path: match &pane.path {
                        Some(path) => resolve_against(&window_path, path),
                        None => window_path.clone(),
                    },
                })
                .collect();

            WindowPlan {
                name: window.name.clone(),
                layout: window.layout.clone().filter(|l| !l.is_empty()),
                path: window_path,
                panes,
            }
        })
        .collect();

    let plan = SessionLayoutPlan { base_path, windows };

    debug!(
        event = "core.layout.resolved",
        preset = preset_name,
        project = %selector.project,
        windows = plan.windows.len(),
        panes = plan.pane_count()
    );

    Ok(plan)
}
