//! Configuration type definitions for roost.
//!
//! These types are deserialized from `~/.roost/config.toml`.
//!
//! # Example Configuration
//!
//! ```toml
//! default_workspace = "ws"
//!
//! [workspaces.ws]
//! name = "Projects"
//! prefix = "ws"
//! path = "~/Projects"
//! remote_owner = "octocat"
//! session_preset = "default"
//! active_projects_first = true
//! enable_git_info = true
//! enable_remote_repos = true
//! enable_cache = true
//! enable_usage_tracking = true
//!
//! [[session_presets.default.windows]]
//! name = "code"
//! layout = "main-vertical"
//! panes = [{ command = "nvim" }, { command = "" }]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Top-level configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RoostConfig {
    /// Workspace used when `-w` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_workspace: Option<String>,

    #[serde(default)]
    pub workspaces: BTreeMap<String, WorkspaceConfig>,

    /// Named, reusable session layouts.
    #[serde(default)]
    pub session_presets: BTreeMap<String, SessionPreset>,
}

/// Backend used to list repositories of the remote owner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RemoteBackend {
    /// GitHub GraphQL API, authenticated with `GITHUB_AUTH`.
    #[default]
    Api,
    /// The `gh` command line client.
    Cli,
}

impl fmt::Display for RemoteBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteBackend::Api => write!(f, "api"),
            RemoteBackend::Cli => write!(f, "cli"),
        }
    }
}

/// Configuration for one workspace (a root directory of projects).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WorkspaceConfig {
    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Session-name prefix; sessions are named `<prefix>-<project>`.
    #[serde(default)]
    pub prefix: String,

    /// Root directory holding the projects. `~` is expanded.
    pub path: String,

    /// GitHub user or organisation owning the remote repositories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_owner: Option<String>,

    #[serde(default)]
    pub is_org: bool,

    /// Name of the session preset. Takes precedence over `session`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_preset: Option<String>,

    /// Inline layout used when no preset name is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionPreset>,

    #[serde(default)]
    pub enable_tenant_repos: bool,

    /// Name prefix identifying tenant repos, e.g. `infra-` pairs `infra-svc` with `svc`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_repo_prefix: Option<String>,

    #[serde(default)]
    pub active_projects_first: bool,

    #[serde(default)]
    pub enable_git_info: bool,

    #[serde(default)]
    pub enable_remote_repos: bool,

    #[serde(default)]
    pub remote_backend: RemoteBackend,

    #[serde(default)]
    pub enable_cache: bool,

    #[serde(default)]
    pub enable_usage_tracking: bool,

    /// Size of the sliding access window. Default: 50.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_access_window: Option<usize>,
}

impl WorkspaceConfig {
    /// Workspace root with `~` expanded.
    pub fn root(&self) -> PathBuf {
        super::expand_tilde(&self.path)
    }

    pub fn project_path(&self, project: &str) -> PathBuf {
        self.root().join(project)
    }

    /// Multiplexer session name for a project.
    pub fn session_name(&self, project: &str) -> String {
        if self.prefix.is_empty() {
            project.to_string()
        } else {
            format!("{}-{}", self.prefix, project)
        }
    }

    /// Project name for a session name belonging to this workspace, if any.
    ///
    /// A workspace without a prefix cannot tell its sessions apart from any
    /// other, so it owns none.
    pub fn project_from_session(&self, session_name: &str) -> Option<String> {
        if self.prefix.is_empty() {
            return None;
        }
        session_name
            .strip_prefix(&self.prefix)
            .and_then(|rest| rest.strip_prefix('-'))
            .filter(|project| !project.is_empty())
            .map(str::to_string)
    }

    pub fn recent_window(&self) -> usize {
        self.recent_access_window
            .filter(|size| *size > 0)
            .unwrap_or(super::defaults::DEFAULT_RECENT_ACCESS_WINDOW)
    }

    /// Usage tracking only runs on top of the cache.
    pub fn tracks_usage(&self) -> bool {
        self.enable_usage_tracking && self.enable_cache
    }

    fn active_tenant_prefix(&self) -> Option<&str> {
        if !self.enable_tenant_repos {
            return None;
        }
        self.tenant_repo_prefix
            .as_deref()
            .filter(|prefix| !prefix.is_empty())
    }

    /// Whether a directory name is a tenant repo folded into its service.
    pub fn is_tenant_repo(&self, name: &str) -> bool {
        self.active_tenant_prefix()
            .is_some_and(|prefix| name.starts_with(prefix))
    }

    /// Tenant twin name for a service repo, when pairing is enabled.
    pub fn tenant_repo_name(&self, service: &str) -> Option<String> {
        self.active_tenant_prefix()
            .map(|prefix| format!("{prefix}{service}"))
    }
}

/// A window/pane layout template.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SessionPreset {
    /// Base directory for the session. Defaults to the project directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default)]
    pub windows: Vec<WindowConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WindowConfig {
    #[serde(default)]
    pub name: String,

    /// tmux layout name applied once all panes exist, e.g. `main-vertical`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    /// Working directory override, relative to the session base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default)]
    pub panes: Vec<PaneConfig>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PaneConfig {
    /// Startup shell command. Empty leaves the pane idle.
    #[serde(default)]
    pub command: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,

    /// Size as a percentage of the window, 1-99.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Resolve a possibly relative path against a base directory.
pub(crate) fn resolve_against(base: &Path, path: &str) -> PathBuf {
    let expanded = super::expand_tilde(path);
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}
