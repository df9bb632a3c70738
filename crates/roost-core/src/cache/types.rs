use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cached facts about one project. Git fields are replaced wholesale on refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCacheEntry {
    #[serde(default)]
    pub git_branch: String,
    #[serde(default)]
    pub git_changes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_changes: Option<usize>,
    #[serde(default)]
    pub access_count_total: u64,
    #[serde(default)]
    pub access_count_recent: u64,
}

impl ProjectCacheEntry {
    /// Entries created only by access recording carry no git facts.
    pub fn has_git_info(&self) -> bool {
        !self.git_branch.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    pub project: String,
    pub timestamp: DateTime<Utc>,
}

/// Git facts for a single repository, as written into the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitFacts {
    pub branch: String,
    pub changes: usize,
}

/// On-disk cache for one workspace root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceCacheFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectCacheEntry>,
    #[serde(default)]
    pub github_repos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_repos_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recent_accesses: Vec<AccessRecord>,
}

impl WorkspaceCacheFile {
    pub fn entry(&self, project: &str) -> Option<&ProjectCacheEntry> {
        self.projects.get(project)
    }

    /// Replace a project's git fields, keeping its access counters.
    pub fn update_git_info(&mut self, project: &str, git: GitFacts, tenant: Option<GitFacts>) {
        let entry = self.projects.entry(project.to_string()).or_default();
        entry.git_branch = git.branch;
        entry.git_changes = git.changes;
        match tenant {
            Some(tenant) => {
                entry.tenant_branch = Some(tenant.branch);
                entry.tenant_changes = Some(tenant.changes);
            }
            None => {
                entry.tenant_branch = None;
                entry.tenant_changes = None;
            }
        }
    }

    pub fn update_remote_repos(&mut self, names: Vec<String>) {
        self.github_repos = names;
        self.github_repos_updated = Some(Utc::now());
    }

    /// Append an access and trim the log to `window` entries, oldest first.
    ///
    /// Recent counters of every project are recomputed from the trimmed log,
    /// since trimming may evict entries of any project.
    pub fn record_access(&mut self, project: &str, window: usize) {
        self.record_access_at(project, window, Utc::now());
    }

    pub(crate) fn record_access_at(&mut self, project: &str, window: usize, at: DateTime<Utc>) {
        self.recent_accesses.push(AccessRecord {
            project: project.to_string(),
            timestamp: at,
        });

        if self.recent_accesses.len() > window {
            let excess = self.recent_accesses.len() - window;
            self.recent_accesses.drain(..excess);
        }

        self.projects
            .entry(project.to_string())
            .or_default()
            .access_count_total += 1;

        let mut counts: HashMap<&str, u64> = HashMap::new();
        for record in &self.recent_accesses {
            *counts.entry(record.project.as_str()).or_default() += 1;
        }
        for (name, entry) in self.projects.iter_mut() {
            entry.access_count_recent = counts.get(name.as_str()).copied().unwrap_or(0);
        }
    }

    /// Number of `project` records present in the access log.
    pub fn recent_count(&self, project: &str) -> u64 {
        self.recent_accesses
            .iter()
            .filter(|record| record.project == project)
            .count() as u64
    }
}

/// Summary for `roost cache status`.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
    pub project_count: usize,
    pub remote_repo_count: usize,
    pub recent_access_count: usize,
    pub last_updated: Option<DateTime<Utc>>,
}
