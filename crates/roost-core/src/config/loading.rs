//! Configuration file location, loading and workspace selection.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::defaults::default_config;
use crate::config::types::{RoostConfig, WorkspaceConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Workspace selector that resolves from the attached session name.
pub const CURRENT_WORKSPACE: &str = "current";

/// Path of the config file: `$ROOST_CONFIG_FILE`, else `~/.roost/config.toml`.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    if let Ok(path_str) = std::env::var("ROOST_CONFIG_FILE")
        && !path_str.is_empty()
    {
        return Ok(PathBuf::from(path_str));
    }

    dirs::home_dir()
        .map(|home| home.join(".roost").join("config.toml"))
        .ok_or(ConfigError::HomeDirNotFound)
}

/// Load and validate the config file.
///
/// A missing file yields the built-in defaults. Parse and validation
/// failures are returned so the caller can decide whether to fall back.
pub fn load_config() -> Result<RoostConfig, ConfigError> {
    let path = config_file_path()?;
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<RoostConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(
                event = "core.config.file_not_found",
                path = %path.display()
            );
            return Ok(default_config());
        }
        Err(source) => {
            return Err(ConfigError::IoError {
                path: path.display().to_string(),
                source,
            });
        }
    };

    let config: RoostConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    validate_config(&config)?;

    info!(
        event = "core.config.loaded",
        path = %path.display(),
        workspaces = config.workspaces.len(),
        presets = config.session_presets.len()
    );

    Ok(config)
}

/// Write the built-in default config. Refuses to overwrite an existing file.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.display().to_string(),
        });
    }

    let io_err = |source| ConfigError::IoError {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let content =
        toml::to_string_pretty(&default_config()).map_err(|e| ConfigError::InvalidConfiguration {
            message: format!("Failed to serialize default config: {e}"),
        })?;

    fs::write(path, content).map_err(io_err)?;

    info!(event = "core.config.default_written", path = %path.display());
    Ok(())
}

/// Pick the workspace for this invocation.
///
/// `requested` may be a workspace key, `current` (derive from the attached
/// session name `<prefix>-<project>`), or absent (use `default_workspace`).
pub fn select_workspace<'a>(
    config: &'a RoostConfig,
    requested: Option<&str>,
    attached_session: Option<&str>,
) -> Result<(&'a str, &'a WorkspaceConfig), ConfigError> {
    let key = match requested {
        Some(CURRENT_WORKSPACE) => attached_session
            .and_then(|session| workspace_for_session(config, session))
            .or(config.default_workspace.as_deref())
            .ok_or(ConfigError::NoWorkspaceSelected)?
            .to_string(),
        Some(name) => name.to_string(),
        None => config
            .default_workspace
            .clone()
            .ok_or(ConfigError::NoWorkspaceSelected)?,
    };

    config
        .workspaces
        .get_key_value(key.as_str())
        .map(|(k, ws)| (k.as_str(), ws))
        .ok_or(ConfigError::WorkspaceNotConfigured { name: key })
}

fn workspace_for_session<'a>(config: &'a RoostConfig, session: &str) -> Option<&'a str> {
    config
        .workspaces
        .iter()
        .filter(|(_, ws)| !ws.prefix.is_empty())
        .find(|(_, ws)| ws.project_from_session(session).is_some())
        .map(|(key, _)| key.as_str())
}

/// Test utilities for config file overrides.
#[doc(hidden)]
pub mod test_helpers {
    use std::sync::Mutex;

    /// Mutex to serialize tests that modify ROOST_CONFIG_FILE.
    pub static CONFIG_FILE_ENV_LOCK: Mutex<()> = Mutex::new(());

    /// RAII guard that removes ROOST_CONFIG_FILE on drop.
    pub struct ConfigFileEnvGuard;

    impl ConfigFileEnvGuard {
        pub fn new(path: &std::path::Path) -> Self {
            // SAFETY: Caller must hold CONFIG_FILE_ENV_LOCK to serialize access
            // from test code.
            unsafe { std::env::set_var("ROOST_CONFIG_FILE", path) };
            Self
        }
    }

    impl Drop for ConfigFileEnvGuard {
        fn drop(&mut self) {
            // SAFETY: Caller holds CONFIG_FILE_ENV_LOCK for the guard's lifetime.
            unsafe { std::env::remove_var("ROOST_CONFIG_FILE") };
        }
    }
}
