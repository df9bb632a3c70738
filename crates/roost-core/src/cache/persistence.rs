//! Workspace cache persistence
//!
//! One JSON file per workspace root. Loading never fails; saving writes a
//! temp file and renames it into place.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use super::errors::CacheError;
use super::types::{CacheStats, WorkspaceCacheFile};

pub const CACHE_FILE_NAME: &str = ".roost-cache.json";

pub fn cache_file_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(CACHE_FILE_NAME)
}

/// Load the cache for a workspace root.
///
/// A missing, unreadable or corrupt file yields an empty cache.
pub fn load_cache(workspace_root: &Path) -> WorkspaceCacheFile {
    let path = cache_file_path(workspace_root);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(event = "core.cache.not_found", path = %path.display());
            return WorkspaceCacheFile::default();
        }
        Err(e) => {
            error!(
                event = "core.cache.load_failed",
                path = %path.display(),
                error = %e
            );
            return WorkspaceCacheFile::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(cache) => {
            debug!(event = "core.cache.loaded", path = %path.display());
            cache
        }
        Err(e) => {
            warn!(
                event = "core.cache.parse_failed",
                path = %path.display(),
                error = %e,
                "Cache file is corrupt, starting from an empty cache"
            );
            WorkspaceCacheFile::default()
        }
    }
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        warn!(
            event = "core.cache.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err
        );
    }
}

/// Stamp `last_updated` and write the cache atomically.
pub fn save_cache(workspace_root: &Path, cache: &mut WorkspaceCacheFile) -> Result<(), CacheError> {
    let path = cache_file_path(workspace_root);
    cache.last_updated = Some(Utc::now());

    let json = serde_json::to_string_pretty(cache).map_err(|e| CacheError::SerializationFailed {
        message: e.to_string(),
    })?;

    let write_err = |source| CacheError::WriteFailed {
        path: path.display().to_string(),
        source,
    };

    let temp_file = path.with_extension("json.tmp");

    if let Err(e) = fs::write(&temp_file, &json) {
        cleanup_temp_file(&temp_file, &e);
        return Err(write_err(e));
    }

    if let Err(e) = fs::rename(&temp_file, &path) {
        cleanup_temp_file(&temp_file, &e);
        return Err(write_err(e));
    }

    info!(
        event = "core.cache.saved",
        path = %path.display(),
        projects = cache.projects.len(),
        remote_repos = cache.github_repos.len()
    );
    Ok(())
}

/// Delete the cache file. A missing file is not an error.
pub fn clear_cache(workspace_root: &Path) -> Result<bool, CacheError> {
    let path = cache_file_path(workspace_root);
    match fs::remove_file(&path) {
        Ok(()) => {
            info!(event = "core.cache.cleared", path = %path.display());
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(CacheError::ClearFailed {
            path: path.display().to_string(),
            source,
        }),
    }
}

pub fn cache_stats(workspace_root: &Path) -> CacheStats {
    let path = cache_file_path(workspace_root);
    let metadata = fs::metadata(&path).ok();
    let cache = load_cache(workspace_root);

    CacheStats {
        exists: metadata.is_some(),
        size_bytes: metadata.as_ref().map(|m| m.len()).unwrap_or(0),
        modified: metadata
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from),
        project_count: cache.projects.len(),
        remote_repo_count: cache.github_repos.len(),
        recent_access_count: cache.recent_accesses.len(),
        last_updated: cache.last_updated,
        path,
    }
}
