use crate::config::types::{RoostConfig, SessionPreset};
use crate::errors::ConfigError;

fn invalid(message: String) -> ConfigError {
    ConfigError::InvalidConfiguration { message }
}

fn validate_preset(label: &str, preset: &SessionPreset) -> Result<(), ConfigError> {
    if preset.windows.is_empty() {
        return Err(invalid(format!("{label} has no windows")));
    }
    for (w, window) in preset.windows.iter().enumerate() {
        if window.panes.is_empty() {
            return Err(invalid(format!("{label} window {w} has no panes")));
        }
        for (p, pane) in window.panes.iter().enumerate() {
            if let Some(size) = pane.size
                && !(1..=99).contains(&size)
            {
                return Err(invalid(format!(
                    "{label} window {w} pane {p} has size {size}, expected 1-99"
                )));
            }
        }
    }
    Ok(())
}

/// Validate cross-references and value ranges in a loaded config.
pub fn validate_config(config: &RoostConfig) -> Result<(), ConfigError> {
    if let Some(default) = &config.default_workspace
        && !config.workspaces.contains_key(default)
    {
        return Err(invalid(format!(
            "default_workspace '{default}' is not a configured workspace"
        )));
    }

    for (name, preset) in &config.session_presets {
        validate_preset(&format!("session preset '{name}'"), preset)?;
    }

    for (key, ws) in &config.workspaces {
        if ws.path.trim().is_empty() {
            return Err(invalid(format!("workspace '{key}' has an empty path")));
        }
        if let Some(preset) = &ws.session_preset
            && !config.session_presets.contains_key(preset)
        {
            return Err(invalid(format!(
                "workspace '{key}' references unknown session preset '{preset}'"
            )));
        }
        if let Some(session) = &ws.session {
            validate_preset(&format!("workspace '{key}' inline session"), session)?;
        }
        if ws.enable_tenant_repos
            && ws
                .tenant_repo_prefix
                .as_deref()
                .is_none_or(|prefix| prefix.is_empty())
        {
            return Err(invalid(format!(
                "workspace '{key}' enables tenant repos without a tenant_repo_prefix"
            )));
        }
        if ws.recent_access_window == Some(0) {
            return Err(invalid(format!(
                "workspace '{key}' has recent_access_window = 0"
            )));
        }
        if ws.enable_remote_repos && ws.remote_owner.is_none() {
            return Err(invalid(format!(
                "workspace '{key}' enables remote repos without a remote_owner"
            )));
        }
    }

    Ok(())
}
