//! Usage tracking on top of the workspace cache.

use tracing::{debug, warn};

use crate::cache::{CacheError, WorkspaceCacheFile, save_cache};
use crate::config::WorkspaceConfig;

/// Record one access of `project`. Returns whether anything was recorded.
///
/// Disabled unless both usage tracking and caching are on.
pub fn record_access(
    workspace: &WorkspaceConfig,
    cache: &mut WorkspaceCacheFile,
    project: &str,
) -> bool {
    if !workspace.tracks_usage() {
        return false;
    }
    cache.record_access(project, workspace.recent_window());
    debug!(
        event = "core.usage.recorded",
        project = project,
        recent = cache.recent_count(project)
    );
    true
}

/// Save the cache when caching is enabled for the workspace.
pub fn save_workspace_cache(
    workspace: &WorkspaceConfig,
    cache: &mut WorkspaceCacheFile,
) -> Result<bool, CacheError> {
    if !workspace.enable_cache {
        return Ok(false);
    }
    save_cache(&workspace.root(), cache)?;
    Ok(true)
}

/// Save, logging instead of failing. Cache writes never abort a flow.
pub fn save_best_effort(workspace: &WorkspaceConfig, cache: &mut WorkspaceCacheFile) {
    if let Err(e) = save_workspace_cache(workspace, cache) {
        warn!(event = "core.usage.cache_save_failed", error = %e);
    }
}
