//! GitHub-backed flows: workflow status, open pull requests, code search.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::WorkspaceConfig;
use crate::git::{GitError, GitInspector};
use crate::layout::ProjectSelector;
use crate::picker::PickerItem;
use crate::remote::{BranchStatus, GitHubService, PullRequestSummary, RemoteError};

use super::errors::SessionError;
use super::open::{clone_project, ensure_root, launch};
use super::types::{SearchOutcome, SessionContext};

pub const DEFAULT_WORKFLOW: &str = "deploy.yaml";
pub const SEARCH_RESULT_LIMIT: usize = 10;

const FALLBACK_MAIN_BRANCHES: [&str; 2] = ["main", "master"];
const DEPLOY_BRANCHES: [&str; 2] = ["staging", "production"];

fn owner(workspace: &WorkspaceConfig) -> Result<&str, SessionError> {
    workspace
        .remote_owner
        .as_deref()
        .filter(|o| !o.is_empty())
        .ok_or_else(|| {
            RemoteError::OwnerNotConfigured {
                workspace: workspace.name.clone(),
            }
            .into()
        })
}

fn local_project(workspace: &WorkspaceConfig, project: &str) -> Result<PathBuf, SessionError> {
    let root = ensure_root(workspace)?;
    let path = root.join(project);
    if !path.is_dir() {
        return Err(SessionError::ProjectNotFound {
            name: project.to_string(),
            root: root.display().to_string(),
        });
    }
    Ok(path)
}

/// Branches whose deployments are worth reporting, in display order.
///
/// The origin default branch (or `main`/`master`) comes first, then
/// `staging` and `production` when origin has them. A checked-out branch
/// outside that set is put in front.
pub fn workflow_branches(git: &dyn GitInspector, path: &Path) -> Result<Vec<String>, GitError> {
    let mut branches = Vec::new();

    let main = match git.origin_head(path)? {
        Some(head) => Some(head),
        None => FALLBACK_MAIN_BRANCHES
            .into_iter()
            .find(|b| git.has_origin_branch(path, b))
            .map(str::to_string),
    };
    branches.extend(main);

    for branch in DEPLOY_BRANCHES {
        if git.has_origin_branch(path, branch) && !branches.iter().any(|b| b == branch) {
            branches.push(branch.to_string());
        }
    }

    if let Some(current) = git.branch(path)?
        && !branches.contains(&current)
    {
        branches.insert(0, current);
    }

    if branches.is_empty() {
        return Err(GitError::NoBranch {
            path: path.display().to_string(),
        });
    }
    Ok(branches)
}

/// Latest run of `workflow` on each of the project's deployment branches.
pub fn workflow_status(
    workspace: &WorkspaceConfig,
    git: &dyn GitInspector,
    github: &dyn GitHubService,
    project: &str,
    workflow: &str,
) -> Result<Vec<BranchStatus>, SessionError> {
    let owner = owner(workspace)?;
    let path = local_project(workspace, project)?;
    let branches = workflow_branches(git, &path)?;

    info!(
        event = "core.actions.branches_resolved",
        project = project,
        branches = ?branches
    );

    branches
        .into_iter()
        .map(|branch| -> Result<BranchStatus, SessionError> {
            let run = github.latest_workflow_run(owner, project, workflow, &branch)?;
            Ok(BranchStatus { branch, run })
        })
        .collect()
}

/// Open pull requests whose head is `branch`, defaulting to the project's
/// checked-out branch. Returns the branch used with the requests.
pub fn open_pull_requests(
    workspace: &WorkspaceConfig,
    git: &dyn GitInspector,
    github: &dyn GitHubService,
    project: &str,
    branch: Option<&str>,
) -> Result<(String, Vec<PullRequestSummary>), SessionError> {
    let owner = owner(workspace)?;
    let path = local_project(workspace, project)?;

    let branch = match branch {
        Some(branch) => branch.to_string(),
        None => git.branch(&path)?.ok_or_else(|| GitError::NoBranch {
            path: path.display().to_string(),
        })?,
    };

    let pulls = github.open_pull_requests(owner, project, &branch)?;
    info!(
        event = "core.pulls.listed",
        project = project,
        branch = %branch,
        count = pulls.len()
    );
    Ok((branch, pulls))
}

fn search_title(terms: &str) -> String {
    format!("Search results for '{}'", terms.trim())
}

/// Search the owner's code, pick a hit, and open its repository at the file.
///
/// Only the first [`SEARCH_RESULT_LIMIT`] hits are offered. A repository
/// missing locally is cloned, since the search proved it exists remotely.
pub fn search_code(ctx: &SessionContext<'_>, terms: &str) -> Result<SearchOutcome, SessionError> {
    let ws = ctx.workspace;
    let owner = owner(ws)?;
    let root = ensure_root(ws)?;

    let mut matches = ctx.github.search_code(owner, ws.is_org, terms)?;
    if matches.is_empty() {
        info!(event = "core.search.no_results", terms = terms);
        return Ok(SearchOutcome::NoResults);
    }
    matches.truncate(SEARCH_RESULT_LIMIT);

    let items: Vec<PickerItem> = matches
        .iter()
        .enumerate()
        .map(|(index, hit)| PickerItem {
            label: format!("{}/{}", hit.repo, hit.path),
            subtitle: hit.fragment.lines().next().unwrap_or_default().trim().to_string(),
            key: index.to_string(),
            active: false,
        })
        .collect();

    let chosen = ctx
        .picker
        .pick(&search_title(terms), &items)?
        .and_then(|key| key.parse::<usize>().ok())
        .and_then(|index| matches.into_iter().nth(index));
    let Some(hit) = chosen else {
        info!(event = "core.search.cancelled");
        return Ok(SearchOutcome::Cancelled);
    };

    let project_path = root.join(&hit.repo);
    let cloned = !project_path.is_dir();
    if cloned {
        clone_project(ctx, &root, &hit.repo)?;
    }

    let selector = ProjectSelector {
        project: hit.repo.clone(),
        file: Some(hit.path.clone()),
        extra: None,
    };
    let result = launch(ctx, &selector, &project_path, cloned)?;
    Ok(SearchOutcome::Opened {
        project: result.project,
        file: hit.path,
        outcome: result.outcome,
        cloned,
    })
}
