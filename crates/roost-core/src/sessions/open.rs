//! Opening a named project: locate or clone, resolve the layout, materialize.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cache::{WorkspaceCacheFile, load_cache};
use crate::config::WorkspaceConfig;
use crate::layout::{ProjectSelector, resolve_layout};
use crate::tmux::materialize;

use super::errors::SessionError;
use super::types::{OpenResult, SessionContext};

/// Workspace root, which must exist.
pub(super) fn ensure_root(workspace: &WorkspaceConfig) -> Result<PathBuf, SessionError> {
    let root = workspace.root();
    if !root.is_dir() {
        return Err(SessionError::WorkspaceRootMissing {
            path: root.display().to_string(),
        });
    }
    Ok(root)
}

/// The on-disk cache when caching is enabled, otherwise an empty one.
pub(super) fn load_workspace_cache(workspace: &WorkspaceConfig, root: &Path) -> WorkspaceCacheFile {
    if workspace.enable_cache {
        load_cache(root)
    } else {
        WorkspaceCacheFile::default()
    }
}

pub(super) fn clone_project(
    ctx: &SessionContext<'_>,
    root: &Path,
    name: &str,
) -> Result<PathBuf, SessionError> {
    let owner = ctx
        .workspace
        .remote_owner
        .as_deref()
        .filter(|o| !o.is_empty())
        .ok_or_else(|| SessionError::CloneUnavailable {
            name: name.to_string(),
        })?;
    Ok(ctx.cloner.clone_repo(root, owner, name)?)
}

/// Resolve the layout for an existing project directory and materialize it.
pub(super) fn launch(
    ctx: &SessionContext<'_>,
    selector: &ProjectSelector,
    project_path: &Path,
    cloned: bool,
) -> Result<OpenResult, SessionError> {
    let plan = resolve_layout(ctx.workspace, ctx.presets, selector, project_path)?;
    let session = ctx.workspace.session_name(&selector.project);
    let outcome = materialize(ctx.mux, &session, &plan)?;

    info!(
        event = "core.session.opened",
        project = %selector.project,
        session = %session,
        outcome = ?outcome,
        cloned = cloned
    );

    Ok(OpenResult {
        project: selector.project.clone(),
        session,
        outcome,
        cloned,
    })
}

/// Open `project[:file[:extra]]` directly.
///
/// A missing project is cloned when its name is in the cached remote list.
/// Direct opens do not count as usage.
pub fn open_project(ctx: &SessionContext<'_>, selector: &str) -> Result<OpenResult, SessionError> {
    let selector = ProjectSelector::parse(selector)?;
    let root = ensure_root(ctx.workspace)?;
    let project_path = root.join(&selector.project);

    let cloned = if project_path.is_dir() {
        false
    } else {
        let cache = load_workspace_cache(ctx.workspace, &root);
        if !cache.github_repos.iter().any(|r| r == &selector.project) {
            return Err(SessionError::ProjectNotFound {
                name: selector.project.clone(),
                root: root.display().to_string(),
            });
        }
        clone_project(ctx, &root, &selector.project)?;
        true
    };

    launch(ctx, &selector, &project_path, cloned)
}
