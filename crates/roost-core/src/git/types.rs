use crate::cache::GitFacts;

/// Branch and dirty-file count of one repository.
///
/// A failed query yields `has_error` with an empty branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoStatus {
    pub branch: String,
    pub changes: usize,
    pub has_error: bool,
}

impl RepoStatus {
    pub fn failed() -> Self {
        Self {
            has_error: true,
            ..Default::default()
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.changes > 0
    }

    pub fn facts(&self) -> GitFacts {
        GitFacts {
            branch: self.branch.clone(),
            changes: self.changes,
        }
    }
}

impl From<GitFacts> for RepoStatus {
    fn from(facts: GitFacts) -> Self {
        Self {
            branch: facts.branch,
            changes: facts.changes,
            has_error: false,
        }
    }
}

/// A project to inspect, with the directory name of its tenant twin if one
/// exists on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitTarget {
    pub name: String,
    pub tenant: Option<String>,
}

/// Collected git facts for a project and its optional tenant twin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoGitInfo {
    pub status: RepoStatus,
    pub tenant: Option<RepoStatus>,
}
