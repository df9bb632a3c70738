//! git CLI wrappers for operations that need the user's credentials.
//!
//! Cloning over SSH goes through the `git` binary so the user's SSH agent and
//! credential helpers apply without any auth code here.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{error, info};

use super::errors::GitError;

/// Reject values that could be read as options or carry control characters.
pub fn validate_git_arg(value: &str, label: &str) -> Result<(), GitError> {
    if value.is_empty() {
        return Err(GitError::OperationFailed {
            message: format!("Invalid {label}: must not be empty"),
        });
    }
    if value.starts_with('-') {
        return Err(GitError::OperationFailed {
            message: format!("Invalid {label}: '{value}' (must not start with '-')"),
        });
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(GitError::OperationFailed {
            message: format!("Invalid {label}: contains control characters"),
        });
    }
    if value == "." || value == ".." || value.contains("::") || value.contains('/') {
        return Err(GitError::OperationFailed {
            message: format!("Invalid {label}: '{value}' is not a plain name"),
        });
    }
    Ok(())
}

pub fn clone_url(owner: &str, name: &str) -> String {
    format!("git@github.com:{owner}/{name}.git")
}

/// Clone `owner/name` into `<root>/<name>` and return the new path.
pub fn clone_repo(root: &Path, owner: &str, name: &str) -> Result<PathBuf, GitError> {
    validate_git_arg(owner, "repository owner")?;
    validate_git_arg(name, "repository name")?;

    let destination = root.join(name);
    if destination.exists() {
        return Err(GitError::DestinationExists {
            path: destination.display().to_string(),
        });
    }

    let git = which::which("git").map_err(|_| GitError::GitNotFound)?;
    let url = clone_url(owner, name);

    info!(
        event = "core.git.clone_started",
        url = %url,
        destination = %destination.display()
    );

    let output = Command::new(git)
        .current_dir(root)
        .arg("clone")
        .arg(&url)
        .arg(&destination)
        .output()
        .map_err(|e| GitError::CloneFailed {
            url: url.clone(),
            message: format!("Failed to execute git: {e}"),
        })?;

    if output.status.success() {
        info!(event = "core.git.clone_completed", url = %url);
        Ok(destination)
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!(
            event = "core.git.clone_failed",
            url = %url,
            stderr = %stderr.trim()
        );
        Err(GitError::CloneFailed {
            url,
            message: stderr.trim().to_string(),
        })
    }
}

/// Push `branch` of the repository at `repo` to `origin`, setting upstream.
pub fn push_upstream(repo: &Path, branch: &str) -> Result<(), GitError> {
    validate_git_arg(branch, "branch name")?;
    let git = which::which("git").map_err(|_| GitError::GitNotFound)?;

    info!(event = "core.git.push_started", path = %repo.display(), branch = branch);

    let output = Command::new(git)
        .current_dir(repo)
        .args(["push", "-u", "origin", branch])
        .output()
        .map_err(|e| GitError::OperationFailed {
            message: format!("Failed to execute git push: {e}"),
        })?;

    if output.status.success() {
        info!(event = "core.git.push_completed", branch = branch);
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!(event = "core.git.push_failed", branch = branch, stderr = %stderr.trim());
        Err(GitError::OperationFailed {
            message: format!("git push of '{branch}' failed: {}", stderr.trim()),
        })
    }
}

/// git operations that reach the remote with the user's credentials.
pub trait RepoCloner {
    fn clone_repo(&self, root: &Path, owner: &str, name: &str) -> Result<PathBuf, GitError>;

    fn push_upstream(&self, repo: &Path, branch: &str) -> Result<(), GitError>;
}

/// [`RepoCloner`] using the git CLI over SSH.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCliCloner;

impl RepoCloner for GitCliCloner {
    fn clone_repo(&self, root: &Path, owner: &str, name: &str) -> Result<PathBuf, GitError> {
        clone_repo(root, owner, name)
    }

    fn push_upstream(&self, repo: &Path, branch: &str) -> Result<(), GitError> {
        push_upstream(repo, branch)
    }
}
