//! Catalog aggregation.
//!
//! Merges directory entries, git facts (cached or freshly collected),
//! remote repository names and usage counters into one ordered list.
//! No collaborator failure aborts the build; each degrades its own facet.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::cache::WorkspaceCacheFile;
use crate::config::WorkspaceConfig;
use crate::git::{GitInspector, GitTarget, RepoGitInfo, RepoStatus, collect_git_info};
use crate::remote::{RemoteError, RemoteRepoProvider};

use super::types::{Catalog, CatalogItem, ItemKind};

pub const FOLDER_SUBTITLE: &str = "Folder";
pub const CLONE_SUBTITLE: &str = "Clone From GitHub";
pub const REMOTE_ERROR_LABEL: &str = "⚠ GitHub repos unavailable";
pub const REMOTE_ERROR_SUBTITLE: &str = "Check network connection or GITHUB_AUTH token";
pub const ACTIVE_SUFFIX: &str = " (Active)";
pub const TENANT_SUFFIX: &str = " + tenant";

/// Directory names under `root`, sorted by name.
pub fn list_local_entries(root: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Everything the builder reads besides the cache.
pub struct CatalogSources<'a> {
    pub workspace: &'a WorkspaceConfig,
    /// Directory names under the workspace root, in enumeration order.
    pub entries: &'a [String],
    /// Projects with a live session.
    pub active_projects: &'a [String],
    pub extra: Vec<CatalogItem>,
    pub git: &'a dyn GitInspector,
    pub remote: &'a dyn RemoteRepoProvider,
}

pub fn build_catalog(sources: CatalogSources<'_>, cache: &mut WorkspaceCacheFile) -> Catalog {
    let ws = sources.workspace;
    let root = ws.root();
    let on_disk: HashSet<&str> = sources.entries.iter().map(String::as_str).collect();

    let locals: Vec<&String> = sources
        .entries
        .iter()
        .filter(|name| !ws.is_tenant_repo(name))
        .collect();

    let tenant_of = |name: &str| -> Option<String> {
        ws.tenant_repo_name(name)
            .filter(|tenant| on_disk.contains(tenant.as_str()))
    };

    let git_info = if ws.enable_git_info {
        gather_git_info(ws, &root, &locals, &tenant_of, sources.git, cache)
    } else {
        BTreeMap::new()
    };

    let (mut remote_names, remote_error) = if ws.enable_remote_repos {
        acquire_remote_names(ws, sources.remote, cache)
    } else {
        (Vec::new(), None)
    };

    let active: HashSet<&str> = sources.active_projects.iter().map(String::as_str).collect();

    let mut items: Vec<CatalogItem> = locals
        .iter()
        .map(|name| {
            let is_active = active.contains(name.as_str());
            let has_tenant = tenant_of(name).is_some();
            local_item(name, git_info.get(name.as_str()), has_tenant, is_active)
        })
        .collect();

    // A local clone supersedes the clonable suggestion.
    remote_names.retain(|name| !on_disk.contains(name.as_str()));

    if ws.active_projects_first {
        sort_local_items(&mut items, ws.tracks_usage().then_some(&*cache));
    }

    items.extend(remote_names.into_iter().map(|name| CatalogItem {
        label: name.clone(),
        subtitle: CLONE_SUBTITLE.to_string(),
        kind: ItemKind::Clonable { name },
        active: false,
    }));

    items.extend(sources.extra);

    if remote_error.is_some() {
        items.push(CatalogItem {
            label: REMOTE_ERROR_LABEL.to_string(),
            subtitle: REMOTE_ERROR_SUBTITLE.to_string(),
            kind: ItemKind::ErrorPlaceholder,
            active: false,
        });
    }

    info!(
        event = "core.catalog.built",
        items = items.len(),
        git_info = git_info.len(),
        remote_error = remote_error.is_some()
    );

    Catalog {
        items,
        remote_error,
    }
}

fn gather_git_info(
    ws: &WorkspaceConfig,
    root: &Path,
    locals: &[&String],
    tenant_of: &dyn Fn(&str) -> Option<String>,
    git: &dyn GitInspector,
    cache: &mut WorkspaceCacheFile,
) -> BTreeMap<String, RepoGitInfo> {
    let mut result = BTreeMap::new();
    let mut targets = Vec::new();

    for name in locals {
        if !git.has_vcs_marker(&root.join(name)) {
            continue;
        }

        if ws.enable_cache
            && let Some(entry) = cache.entry(name)
            && entry.has_git_info()
        {
            let tenant = entry
                .tenant_branch
                .as_ref()
                .map(|branch| RepoStatus {
                    branch: branch.clone(),
                    changes: entry.tenant_changes.unwrap_or(0),
                    has_error: false,
                });
            result.insert(
                name.to_string(),
                RepoGitInfo {
                    status: RepoStatus {
                        branch: entry.git_branch.clone(),
                        changes: entry.git_changes,
                        has_error: false,
                    },
                    tenant,
                },
            );
            continue;
        }

        targets.push(GitTarget {
            name: name.to_string(),
            tenant: tenant_of(name),
        });
    }

    debug!(
        event = "core.catalog.git_sources",
        cached = result.len(),
        collecting = targets.len()
    );

    for (name, info) in collect_git_info(git, root, &targets) {
        cache.update_git_info(
            &name,
            info.status.facts(),
            info.tenant.as_ref().map(RepoStatus::facts),
        );
        result.insert(name, info);
    }

    result
}

fn acquire_remote_names(
    ws: &WorkspaceConfig,
    provider: &dyn RemoteRepoProvider,
    cache: &mut WorkspaceCacheFile,
) -> (Vec<String>, Option<String>) {
    if ws.enable_cache && !cache.github_repos.is_empty() {
        return (cache.github_repos.clone(), None);
    }

    let fetched = match ws.remote_owner.as_deref().filter(|o| !o.is_empty()) {
        Some(owner) => provider.list_repo_names(owner, ws.is_org),
        None => Err(RemoteError::OwnerNotConfigured {
            workspace: ws.name.clone(),
        }),
    };

    match fetched {
        Ok(names) => {
            cache.update_remote_repos(names.clone());
            (names, None)
        }
        Err(e) => {
            warn!(
                event = "core.catalog.remote_fetch_failed",
                backend = provider.name(),
                error = %e
            );
            (Vec::new(), Some(e.to_string()))
        }
    }
}

fn local_item(
    name: &str,
    info: Option<&RepoGitInfo>,
    has_tenant: bool,
    active: bool,
) -> CatalogItem {
    let mut label = name.to_string();
    if has_tenant {
        label.push_str(TENANT_SUFFIX);
    }
    if active {
        label.push_str(ACTIVE_SUFFIX);
    }

    let subtitle = match info {
        Some(info) => {
            let mut subtitle = format!("Service: {}", status_summary(&info.status));
            if has_tenant && let Some(tenant) = &info.tenant {
                subtitle.push_str(" | Tenant: ");
                subtitle.push_str(&status_summary(tenant));
            }
            subtitle
        }
        None => FOLDER_SUBTITLE.to_string(),
    };

    CatalogItem {
        label,
        subtitle,
        kind: ItemKind::Local {
            name: name.to_string(),
        },
        active,
    }
}

/// `main ✓`, `main (3)`, or the error marker.
pub fn status_summary(status: &RepoStatus) -> String {
    if status.has_error || status.branch.is_empty() {
        "(error loading git info)".to_string()
    } else if status.is_dirty() {
        format!("{} ({})", status.branch, status.changes)
    } else {
        format!("{} ✓", status.branch)
    }
}

/// Stable sort: active first, then recent usage (when given), then name.
fn sort_local_items(items: &mut [CatalogItem], usage: Option<&WorkspaceCacheFile>) {
    let recent = |item: &CatalogItem| -> u64 {
        match (usage, item.project_name()) {
            (Some(cache), Some(name)) => cache.recent_count(name),
            _ => 0,
        }
    };

    items.sort_by(|a, b| {
        b.active
            .cmp(&a.active)
            .then_with(|| match usage {
                Some(_) => recent(b).cmp(&recent(a)),
                None => Ordering::Equal,
            })
            .then_with(|| a.project_name().cmp(&b.project_name()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeInspector, FakeRemote};
    use tempfile::TempDir;

    fn workspace() -> WorkspaceConfig {
        WorkspaceConfig {
            name: "Projects".to_string(),
            prefix: "ws".to_string(),
            path: "/w".to_string(),
            remote_owner: Some("octocat".to_string()),
            enable_git_info: true,
            ..Default::default()
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn build(
        ws: &WorkspaceConfig,
        entries: &[String],
        active: &[String],
        git: &FakeInspector,
        remote: &FakeRemote,
        cache: &mut WorkspaceCacheFile,
    ) -> Catalog {
        build_catalog(
            CatalogSources {
                workspace: ws,
                entries,
                active_projects: active,
                extra: Vec::new(),
                git,
                remote,
            },
            cache,
        )
    }

    fn labels(catalog: &Catalog) -> Vec<&str> {
        catalog.items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn test_list_local_entries_only_directories_sorted() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("zeta")).unwrap();
        fs::create_dir(temp_dir.path().join("alpha")).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();

        assert_eq!(
            list_local_entries(temp_dir.path()).unwrap(),
            vec!["alpha", "zeta"]
        );
        assert!(list_local_entries(&temp_dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_subtitles_reflect_git_state() {
        let ws = workspace();
        let git = FakeInspector::default()
            .repo("clean", "main", 0)
            .repo("dirty", "dev", 3)
            .broken("broken");
        let mut cache = WorkspaceCacheFile::default();
        let catalog = build(
            &ws,
            &names(&["broken", "clean", "dirty", "plain"]),
            &[],
            &git,
            &FakeRemote::ok(&[]),
            &mut cache,
        );

        let subtitles: Vec<_> = catalog.items.iter().map(|i| i.subtitle.as_str()).collect();
        assert_eq!(
            subtitles,
            vec![
                "Service: (error loading git info)",
                "Service: main ✓",
                "Service: dev (3)",
                "Folder",
            ]
        );
    }

    #[test]
    fn test_git_info_disabled_shows_folders() {
        let ws = WorkspaceConfig {
            enable_git_info: false,
            ..workspace()
        };
        let git = FakeInspector::default().repo("clean", "main", 0);
        let mut cache = WorkspaceCacheFile::default();
        let catalog = build(&ws, &names(&["clean"]), &[], &git, &FakeRemote::ok(&[]), &mut cache);

        assert_eq!(catalog.items[0].subtitle, FOLDER_SUBTITLE);
        assert_eq!(git.call_count(), 0);
    }

    #[test]
    fn test_cached_entries_skip_collection_and_fresh_results_are_cached() {
        let ws = WorkspaceConfig {
            enable_cache: true,
            ..workspace()
        };
        let git = FakeInspector::default()
            .repo("cached", "live-branch", 9)
            .repo("fresh", "main", 1);
        let mut cache = WorkspaceCacheFile::default();
        cache.update_git_info(
            "cached",
            crate::cache::GitFacts {
                branch: "stale".to_string(),
                changes: 0,
            },
            None,
        );

        let catalog = build(
            &ws,
            &names(&["cached", "fresh"]),
            &[],
            &git,
            &FakeRemote::ok(&[]),
            &mut cache,
        );

        assert_eq!(catalog.items[0].subtitle, "Service: stale ✓");
        assert_eq!(catalog.items[1].subtitle, "Service: main (1)");
        assert_eq!(cache.entry("fresh").unwrap().git_branch, "main");
        assert!(git.queried_paths().iter().all(|p| p.ends_with("fresh")));
    }

    #[test]
    fn test_cache_disabled_collects_everything() {
        let ws = workspace();
        let git = FakeInspector::default().repo("cached", "live", 0);
        let mut cache = WorkspaceCacheFile::default();
        cache.update_git_info(
            "cached",
            crate::cache::GitFacts {
                branch: "stale".to_string(),
                changes: 0,
            },
            None,
        );

        let catalog = build(&ws, &names(&["cached"]), &[], &git, &FakeRemote::ok(&[]), &mut cache);
        assert_eq!(catalog.items[0].subtitle, "Service: live ✓");
        assert_eq!(cache.entry("cached").unwrap().git_branch, "live");
    }

    #[test]
    fn test_tenant_repo_folded_into_service() {
        let ws = WorkspaceConfig {
            enable_tenant_repos: true,
            tenant_repo_prefix: Some("infra-".to_string()),
            ..workspace()
        };
        let git = FakeInspector::default()
            .repo("svc-a", "main", 0)
            .repo("infra-svc-a", "prod", 2);
        let mut cache = WorkspaceCacheFile::default();
        let catalog = build(
            &ws,
            &names(&["infra-svc-a", "svc-a"]),
            &[],
            &git,
            &FakeRemote::ok(&[]),
            &mut cache,
        );

        assert_eq!(labels(&catalog), vec!["svc-a + tenant"]);
        assert_eq!(
            catalog.items[0].subtitle,
            "Service: main ✓ | Tenant: prod (2)"
        );
        assert_eq!(
            cache.entry("svc-a").unwrap().tenant_branch.as_deref(),
            Some("prod")
        );
    }

    #[test]
    fn test_remote_names_appended_without_local_duplicates() {
        let ws = WorkspaceConfig {
            enable_remote_repos: true,
            enable_cache: true,
            ..workspace()
        };
        let git = FakeInspector::default();
        let remote = FakeRemote::ok(&["local-one", "remote-two"]);
        let mut cache = WorkspaceCacheFile::default();
        let catalog = build(&ws, &names(&["local-one"]), &[], &git, &remote, &mut cache);

        assert_eq!(labels(&catalog), vec!["local-one", "remote-two"]);
        assert_eq!(
            catalog.items[1].kind,
            ItemKind::Clonable {
                name: "remote-two".to_string()
            }
        );
        assert_eq!(catalog.items[1].subtitle, CLONE_SUBTITLE);
        assert_eq!(cache.github_repos, names(&["local-one", "remote-two"]));
        assert!(!catalog.has_remote_error());
    }

    #[test]
    fn test_cached_remote_list_is_preferred() {
        let ws = WorkspaceConfig {
            enable_remote_repos: true,
            enable_cache: true,
            ..workspace()
        };
        let remote = FakeRemote::ok(&["fresh"]);
        let mut cache = WorkspaceCacheFile::default();
        cache.update_remote_repos(names(&["cached"]));

        let catalog = build(&ws, &[], &[], &FakeInspector::default(), &remote, &mut cache);
        assert_eq!(labels(&catalog), vec!["cached"]);
        assert_eq!(remote.call_count(), 0);
    }

    #[test]
    fn test_remote_failure_degrades_to_single_placeholder() {
        let ws = WorkspaceConfig {
            enable_remote_repos: true,
            ..workspace()
        };
        let git = FakeInspector::default().repo("a", "main", 0);
        let entries = names(&["a", "b"]);

        let mut cache = WorkspaceCacheFile::default();
        let healthy = build(&ws, &entries, &[], &git, &FakeRemote::ok(&[]), &mut cache);

        let mut cache = WorkspaceCacheFile::default();
        let degraded = build(&ws, &entries, &[], &git, &FakeRemote::failing(), &mut cache);

        assert!(degraded.has_remote_error());
        assert_eq!(degraded.items.len(), healthy.items.len() + 1);
        assert_eq!(&degraded.items[..2], &healthy.items[..]);
        let last = degraded.items.last().unwrap();
        assert_eq!(last.kind, ItemKind::ErrorPlaceholder);
        assert_eq!(last.label, REMOTE_ERROR_LABEL);
        assert!(cache.github_repos.is_empty());
    }

    #[test]
    fn test_active_first_then_recent_then_name() {
        let ws = WorkspaceConfig {
            active_projects_first: true,
            enable_cache: true,
            enable_usage_tracking: true,
            enable_remote_repos: true,
            ..workspace()
        };
        let mut cache = WorkspaceCacheFile::default();
        cache.update_remote_repos(names(&["aaa-remote"]));
        for project in ["c", "c", "b", "d", "d", "d"] {
            cache.record_access(project, 50);
        }

        let catalog = build(
            &ws,
            &names(&["a", "b", "c", "d", "e"]),
            &names(&["e", "a"]),
            &FakeInspector::default(),
            &FakeRemote::ok(&[]),
            &mut cache,
        );

        assert_eq!(
            labels(&catalog),
            vec!["a (Active)", "e (Active)", "d", "c", "b", "aaa-remote"]
        );
        assert!(catalog.items[0].active);
    }

    #[test]
    fn test_active_first_without_usage_sorts_by_name() {
        let ws = WorkspaceConfig {
            active_projects_first: true,
            ..workspace()
        };
        let mut cache = WorkspaceCacheFile::default();
        cache.record_access("c", 50);

        let catalog = build(
            &ws,
            &names(&["c", "b", "a"]),
            &names(&["b"]),
            &FakeInspector::default(),
            &FakeRemote::ok(&[]),
            &mut cache,
        );
        assert_eq!(labels(&catalog), vec!["b (Active)", "a", "c"]);
    }

    #[test]
    fn test_ordering_disabled_keeps_enumeration_order() {
        let ws = workspace();
        let mut cache = WorkspaceCacheFile::default();
        let catalog = build(
            &ws,
            &names(&["c", "a", "b"]),
            &names(&["b"]),
            &FakeInspector::default(),
            &FakeRemote::ok(&[]),
            &mut cache,
        );
        assert_eq!(labels(&catalog), vec!["c", "a", "b (Active)"]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let ws = WorkspaceConfig {
            active_projects_first: true,
            enable_cache: true,
            enable_usage_tracking: true,
            enable_remote_repos: true,
            ..workspace()
        };
        let git = FakeInspector::default()
            .repo("a", "main", 1)
            .repo("b", "dev", 0);
        let remote = FakeRemote::ok(&["r1", "a"]);
        let entries = names(&["b", "a", "c"]);
        let active = names(&["c"]);

        let mut cache_one = WorkspaceCacheFile::default();
        cache_one.record_access("b", 50);
        let mut cache_two = cache_one.clone();

        let first = build(&ws, &entries, &active, &git, &remote, &mut cache_one);
        let second = build(&ws, &entries, &active, &git, &remote, &mut cache_two);
        assert_eq!(first, second);
    }

    #[test]
    fn test_extra_items_follow_remote_items() {
        let ws = workspace();
        let extra = CatalogItem {
            label: "preset".to_string(),
            subtitle: String::new(),
            kind: ItemKind::Extra {
                key: "preset".to_string(),
            },
            active: false,
        };
        let mut cache = WorkspaceCacheFile::default();
        let catalog = build_catalog(
            CatalogSources {
                workspace: &ws,
                entries: &names(&["a"]),
                active_projects: &[],
                extra: vec![extra.clone()],
                git: &FakeInspector::default(),
                remote: &FakeRemote::ok(&[]),
            },
            &mut cache,
        );
        assert_eq!(catalog.items.last(), Some(&extra));
    }
}
