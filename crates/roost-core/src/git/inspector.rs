//! Per-repository git queries.

use std::path::Path;

use git2::{ErrorCode, Repository, StatusOptions};
use tracing::debug;

use super::errors::GitError;
use super::types::RepoStatus;

/// Low-level git facts for one directory.
pub trait GitInspector: Send + Sync {
    /// Whether the directory carries a version-control marker.
    fn has_vcs_marker(&self, path: &Path) -> bool;

    /// Current branch name, or `None` for a detached HEAD.
    fn branch(&self, path: &Path) -> Result<Option<String>, GitError>;

    /// Number of entries a status query reports. Zero means clean.
    fn dirty_count(&self, path: &Path) -> Result<usize, GitError>;

    /// Default branch of `origin` as last fetched (`refs/remotes/origin/HEAD`).
    fn origin_head(&self, _path: &Path) -> Result<Option<String>, GitError> {
        Ok(None)
    }

    /// Whether `origin/<branch>` is known locally.
    fn has_origin_branch(&self, _path: &Path, _branch: &str) -> bool {
        false
    }
}

/// Query both facts, folding any failure into `has_error`.
pub fn inspect(inspector: &dyn GitInspector, path: &Path) -> RepoStatus {
    let branch = match inspector.branch(path) {
        Ok(Some(branch)) => branch,
        Ok(None) => {
            debug!(event = "core.git.detached_head", path = %path.display());
            return RepoStatus::failed();
        }
        Err(e) => {
            debug!(event = "core.git.branch_failed", path = %path.display(), error = %e);
            return RepoStatus::failed();
        }
    };

    match inspector.dirty_count(path) {
        Ok(changes) => RepoStatus {
            branch,
            changes,
            has_error: false,
        },
        Err(e) => {
            debug!(event = "core.git.status_failed", path = %path.display(), error = %e);
            RepoStatus::failed()
        }
    }
}

/// [`GitInspector`] backed by libgit2.
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2Inspector;

impl Git2Inspector {
    fn open(path: &Path) -> Result<Repository, GitError> {
        Repository::open(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GitError::RepositoryNotFound {
                    path: path.display().to_string(),
                }
            } else {
                GitError::Git2Error { source: e }
            }
        })
    }
}

impl GitInspector for Git2Inspector {
    fn has_vcs_marker(&self, path: &Path) -> bool {
        path.join(".git").exists()
    }

    fn branch(&self, path: &Path) -> Result<Option<String>, GitError> {
        let repo = Self::open(path)?;

        let head = match repo.head() {
            Ok(head) => head,
            // Fresh repository: HEAD names a branch with no commits yet.
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head_ref = repo.find_reference("HEAD")?;
                return Ok(head_ref
                    .symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(str::to_string));
            }
            Err(e) => return Err(GitError::Git2Error { source: e }),
        };

        if !head.is_branch() {
            return Ok(None);
        }
        Ok(head.shorthand().map(str::to_string))
    }

    fn dirty_count(&self, path: &Path) -> Result<usize, GitError> {
        let repo = Self::open(path)?;

        let mut opts = StatusOptions::new();
        opts.include_untracked(true);
        opts.include_ignored(false);

        let statuses = repo.statuses(Some(&mut opts))?;
        Ok(statuses.len())
    }

    fn origin_head(&self, path: &Path) -> Result<Option<String>, GitError> {
        let repo = Self::open(path)?;
        let head = match repo.find_reference("refs/remotes/origin/HEAD") {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(GitError::Git2Error { source: e }),
        };
        Ok(head
            .symbolic_target()
            .and_then(|target| target.strip_prefix("refs/remotes/origin/"))
            .map(str::to_string))
    }

    fn has_origin_branch(&self, path: &Path, branch: &str) -> bool {
        Self::open(path).is_ok_and(|repo| {
            repo.find_reference(&format!("refs/remotes/origin/{branch}"))
                .is_ok()
        })
    }
}
