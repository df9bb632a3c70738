//! Fake collaborators shared by unit tests.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;

use crate::config::defaults::default_config;
use crate::config::{Orientation, SessionPreset, WorkspaceConfig};
use crate::git::{GitError, GitInspector, RepoCloner};
use crate::picker::{Picker, PickerError, PickerItem};
use crate::remote::{
    CodeMatch, GitHubService, PullRequestSummary, RemoteError, RemoteRepoProvider, RunState,
    WorkflowRun,
};
use crate::sessions::SessionContext;
use crate::tmux::{Multiplexer, NewWindow, TmuxError};

/// Git inspector scripted by directory name.
#[derive(Default)]
pub struct FakeInspector {
    repos: Mutex<HashMap<String, Option<(String, usize)>>>,
    origins: Mutex<HashMap<String, (Option<String>, Vec<String>)>>,
    calls: Mutex<Vec<PathBuf>>,
}

impl FakeInspector {
    pub fn repo(self, name: &str, branch: &str, changes: usize) -> Self {
        self.add_repo(name, branch, changes);
        self
    }

    /// A repository whose queries fail.
    pub fn broken(self, name: &str) -> Self {
        self.repos.lock().unwrap().insert(name.to_string(), None);
        self
    }

    pub fn add_repo(&self, name: &str, branch: &str, changes: usize) {
        self.repos
            .lock()
            .unwrap()
            .insert(name.to_string(), Some((branch.to_string(), changes)));
    }

    /// Script the origin default branch and remote branches of a repository.
    pub fn origin(self, name: &str, head: Option<&str>, branches: &[&str]) -> Self {
        self.add_origin(name, head, branches);
        self
    }

    pub fn add_origin(&self, name: &str, head: Option<&str>, branches: &[&str]) {
        self.origins.lock().unwrap().insert(
            name.to_string(),
            (
                head.map(str::to_string),
                branches.iter().map(|b| b.to_string()).collect(),
            ),
        );
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn queried_paths(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }

    fn lookup(&self, path: &Path) -> Result<(String, usize), GitError> {
        self.calls.lock().unwrap().push(path.to_path_buf());
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        match self.repos.lock().unwrap().get(name) {
            Some(Some(facts)) => Ok(facts.clone()),
            Some(None) => Err(GitError::OperationFailed {
                message: "scripted failure".to_string(),
            }),
            None => Err(GitError::RepositoryNotFound {
                path: path.display().to_string(),
            }),
        }
    }
}

impl GitInspector for FakeInspector {
    fn has_vcs_marker(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| self.repos.lock().unwrap().contains_key(n))
    }

    fn branch(&self, path: &Path) -> Result<Option<String>, GitError> {
        self.lookup(path).map(|(branch, _)| Some(branch))
    }

    fn dirty_count(&self, path: &Path) -> Result<usize, GitError> {
        self.lookup(path).map(|(_, changes)| changes)
    }

    fn origin_head(&self, path: &Path) -> Result<Option<String>, GitError> {
        Ok(self
            .origins
            .lock()
            .unwrap()
            .get(dir_name(path))
            .and_then(|(head, _)| head.clone()))
    }

    fn has_origin_branch(&self, path: &Path, branch: &str) -> bool {
        self.origins
            .lock()
            .unwrap()
            .get(dir_name(path))
            .is_some_and(|(_, branches)| branches.iter().any(|b| b == branch))
    }
}

fn dir_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
}

pub struct FakeRemote {
    names: Option<Vec<String>>,
    calls: AtomicUsize,
}

impl FakeRemote {
    pub fn ok(names: &[&str]) -> Self {
        Self {
            names: Some(names.iter().map(|s| s.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            names: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemoteRepoProvider for FakeRemote {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn list_repo_names(&self, owner: &str, _is_org: bool) -> Result<Vec<String>, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.names.clone().ok_or_else(|| RemoteError::RequestFailed {
            owner: owner.to_string(),
            message: "network unreachable".to_string(),
        })
    }
}

/// Scripted GitHub: records creations and run queries, serves canned data.
#[derive(Default)]
pub struct FakeGitHub {
    fail: bool,
    created: Mutex<Vec<String>>,
    matches: Mutex<Vec<CodeMatch>>,
    runs: Mutex<HashMap<String, RunState>>,
    run_queries: Mutex<Vec<String>>,
    pulls: Mutex<HashMap<String, Vec<PullRequestSummary>>>,
}

impl FakeGitHub {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// `"owner/name private|public"` per created repository.
    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    pub fn add_match(&self, repo: &str, path: &str, fragment: &str) {
        self.matches.lock().unwrap().push(CodeMatch {
            repo: repo.to_string(),
            path: path.to_string(),
            fragment: fragment.to_string(),
            language: String::new(),
        });
    }

    pub fn add_run(&self, branch: &str, state: RunState) {
        self.runs.lock().unwrap().insert(branch.to_string(), state);
    }

    /// `"owner/repo workflow branch"` per run query.
    pub fn run_queries(&self) -> Vec<String> {
        self.run_queries.lock().unwrap().clone()
    }

    pub fn add_pull(&self, branch: &str, number: u64, title: &str) {
        self.pulls
            .lock()
            .unwrap()
            .entry(branch.to_string())
            .or_default()
            .push(PullRequestSummary {
                number,
                title: title.to_string(),
                url: format!("https://github.com/octocat/api/pull/{number}"),
                author: "octocat".to_string(),
                draft: false,
            });
    }

    fn check(&self, operation: &str) -> Result<(), RemoteError> {
        if self.fail {
            Err(RemoteError::ApiStatus {
                operation: operation.to_string(),
                status: 422,
                message: "scripted failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl GitHubService for FakeGitHub {
    fn create_repo(
        &self,
        owner: &str,
        _is_org: bool,
        name: &str,
        private: bool,
    ) -> Result<String, RemoteError> {
        self.check("repository creation")?;
        let visibility = if private { "private" } else { "public" };
        self.created
            .lock()
            .unwrap()
            .push(format!("{owner}/{name} {visibility}"));
        Ok(name.to_string())
    }

    fn search_code(
        &self,
        _owner: &str,
        _is_org: bool,
        _terms: &str,
    ) -> Result<Vec<CodeMatch>, RemoteError> {
        self.check("code search")?;
        Ok(self.matches.lock().unwrap().clone())
    }

    fn latest_workflow_run(
        &self,
        owner: &str,
        repo: &str,
        workflow: &str,
        branch: &str,
    ) -> Result<Option<WorkflowRun>, RemoteError> {
        self.check("workflow run listing")?;
        self.run_queries
            .lock()
            .unwrap()
            .push(format!("{owner}/{repo} {workflow} {branch}"));
        Ok(self.runs.lock().unwrap().get(branch).map(|state| WorkflowRun {
            state: *state,
            url: format!("https://github.com/{owner}/{repo}/actions/runs/1"),
        }))
    }

    fn open_pull_requests(
        &self,
        _owner: &str,
        _repo: &str,
        branch: &str,
    ) -> Result<Vec<PullRequestSummary>, RemoteError> {
        self.check("pull request listing")?;
        Ok(self
            .pulls
            .lock()
            .unwrap()
            .get(branch)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MuxCall {
    SessionExists(String),
    ListSessions,
    CreateSession(String),
    CreateWindow(String),
    CreatePane(String),
    RunCommand(String, String),
    ApplyLayout(String, String),
    SelectWindow(String),
    SelectPane(String),
    Attach(String),
    KillSession(String),
}

/// In-memory multiplexer that records every call.
#[derive(Default)]
pub struct RecordingMultiplexer {
    calls: Mutex<Vec<MuxCall>>,
    sessions: Mutex<Vec<String>>,
    next_window: AtomicUsize,
    next_pane: AtomicUsize,
    fail_create_pane: bool,
    unreachable: bool,
}

impl RecordingMultiplexer {
    pub fn with_sessions(names: &[&str]) -> Self {
        let mux = Self::default();
        *mux.sessions.lock().unwrap() = names.iter().map(|s| s.to_string()).collect();
        mux
    }

    pub fn fail_on_create_pane(mut self) -> Self {
        self.fail_create_pane = true;
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn calls(&self) -> Vec<MuxCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&MuxCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    pub fn sessions(&self) -> Vec<String> {
        self.sessions.lock().unwrap().clone()
    }

    fn record(&self, call: MuxCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn reachable(&self) -> Result<(), TmuxError> {
        if self.unreachable {
            Err(TmuxError::BinaryNotFound)
        } else {
            Ok(())
        }
    }

    fn next_pane_id(&self) -> String {
        format!("%{}", self.next_pane.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

impl Multiplexer for RecordingMultiplexer {
    fn session_exists(&self, name: &str) -> Result<bool, TmuxError> {
        self.record(MuxCall::SessionExists(name.to_string()));
        self.reachable()?;
        Ok(self.sessions.lock().unwrap().iter().any(|s| s == name))
    }

    fn list_sessions(&self) -> Result<Vec<String>, TmuxError> {
        self.record(MuxCall::ListSessions);
        self.reachable()?;
        Ok(self.sessions())
    }

    fn attached_session(&self) -> Option<String> {
        None
    }

    fn create_session(&self, name: &str, _base_path: &Path) -> Result<(), TmuxError> {
        self.record(MuxCall::CreateSession(name.to_string()));
        self.sessions.lock().unwrap().push(name.to_string());
        Ok(())
    }

    fn create_window(
        &self,
        _session: &str,
        name: &str,
        _path: &Path,
    ) -> Result<NewWindow, TmuxError> {
        self.record(MuxCall::CreateWindow(name.to_string()));
        let window = self.next_window.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(NewWindow {
            window_id: format!("@{window}"),
            pane_id: self.next_pane_id(),
        })
    }

    fn create_pane(
        &self,
        target_pane: &str,
        _orientation: Orientation,
        _size: Option<u8>,
        _path: &Path,
    ) -> Result<String, TmuxError> {
        self.record(MuxCall::CreatePane(target_pane.to_string()));
        if self.fail_create_pane {
            return Err(TmuxError::CommandFailed {
                command: "split-window".to_string(),
                message: "no space for new pane".to_string(),
            });
        }
        Ok(self.next_pane_id())
    }

    fn run_command(&self, pane: &str, command: &str) -> Result<(), TmuxError> {
        self.record(MuxCall::RunCommand(pane.to_string(), command.to_string()));
        Ok(())
    }

    fn apply_layout(&self, window: &str, layout: &str) -> Result<(), TmuxError> {
        self.record(MuxCall::ApplyLayout(window.to_string(), layout.to_string()));
        Ok(())
    }

    fn select_window(&self, window: &str) -> Result<(), TmuxError> {
        self.record(MuxCall::SelectWindow(window.to_string()));
        Ok(())
    }

    fn select_pane(&self, pane: &str) -> Result<(), TmuxError> {
        self.record(MuxCall::SelectPane(pane.to_string()));
        Ok(())
    }

    fn attach(&self, session: &str) -> Result<(), TmuxError> {
        self.record(MuxCall::Attach(session.to_string()));
        Ok(())
    }

    fn kill_session(&self, session: &str) -> Result<(), TmuxError> {
        self.record(MuxCall::KillSession(session.to_string()));
        self.sessions.lock().unwrap().retain(|s| s != session);
        Ok(())
    }
}

/// Picker that returns a fixed key and remembers what it was shown.
#[derive(Default)]
pub struct ScriptedPicker {
    choice: Option<String>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedPicker {
    pub fn choosing(choice: Option<&str>) -> Self {
        Self {
            choice: choice.map(str::to_string),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Title and labels of the most recent call.
    pub fn last_call(&self) -> Option<(String, Vec<String>)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl Picker for ScriptedPicker {
    fn pick(&self, title: &str, items: &[PickerItem]) -> Result<Option<String>, PickerError> {
        let labels = items.iter().map(|i| i.label.clone()).collect();
        self.calls.lock().unwrap().push((title.to_string(), labels));
        Ok(self.choice.clone())
    }
}

/// Cloner that creates an empty directory instead of running git.
#[derive(Default)]
pub struct FakeCloner {
    cloned: Mutex<Vec<String>>,
    pushed: Mutex<Vec<String>>,
}

impl FakeCloner {
    pub fn cloned(&self) -> Vec<String> {
        self.cloned.lock().unwrap().clone()
    }

    /// `"<repo path>@<branch>"` per push.
    pub fn pushed(&self) -> Vec<String> {
        self.pushed.lock().unwrap().clone()
    }
}

impl RepoCloner for FakeCloner {
    fn clone_repo(&self, root: &Path, owner: &str, name: &str) -> Result<PathBuf, GitError> {
        let destination = root.join(name);
        fs::create_dir_all(&destination)?;
        self.cloned.lock().unwrap().push(format!("{owner}/{name}"));
        Ok(destination)
    }

    fn push_upstream(&self, repo: &Path, branch: &str) -> Result<(), GitError> {
        self.pushed
            .lock()
            .unwrap()
            .push(format!("{}@{branch}", repo.display()));
        Ok(())
    }
}

/// A temporary workspace root with fakes for every collaborator.
pub struct Fixture {
    temp_dir: TempDir,
    pub workspace: WorkspaceConfig,
    pub presets: BTreeMap<String, SessionPreset>,
    pub mux: RecordingMultiplexer,
    pub git: FakeInspector,
    pub remote: FakeRemote,
    pub github: FakeGitHub,
    pub picker: ScriptedPicker,
    pub cloner: FakeCloner,
}

impl Fixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let workspace = WorkspaceConfig {
            name: "Projects".to_string(),
            prefix: "ws".to_string(),
            path: temp_dir.path().display().to_string(),
            remote_owner: Some("octocat".to_string()),
            session_preset: Some("default".to_string()),
            active_projects_first: true,
            enable_git_info: true,
            enable_cache: true,
            enable_usage_tracking: true,
            ..Default::default()
        };
        Self {
            temp_dir,
            workspace,
            presets: default_config().session_presets,
            mux: RecordingMultiplexer::default(),
            git: FakeInspector::default(),
            remote: FakeRemote::ok(&[]),
            github: FakeGitHub::default(),
            picker: ScriptedPicker::default(),
            cloner: FakeCloner::default(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn with_dirs(self, names: &[&str]) -> Self {
        for name in names {
            fs::create_dir_all(self.root().join(name)).unwrap();
        }
        self
    }

    pub fn with_sessions(mut self, names: &[&str]) -> Self {
        self.mux = RecordingMultiplexer::with_sessions(names);
        self
    }

    pub fn unreachable_mux(mut self) -> Self {
        self.mux = RecordingMultiplexer::default().unreachable();
        self
    }

    pub fn picking(mut self, choice: Option<&str>) -> Self {
        self.picker = ScriptedPicker::choosing(choice);
        self
    }

    pub fn with_remote_repos(mut self) -> Self {
        self.workspace.enable_remote_repos = true;
        self
    }

    pub fn failing_remote(mut self) -> Self {
        self.remote = FakeRemote::failing();
        self
    }

    pub fn failing_github(mut self) -> Self {
        self.github = FakeGitHub::failing();
        self
    }

    pub fn ctx(&self) -> SessionContext<'_> {
        SessionContext {
            workspace: &self.workspace,
            presets: &self.presets,
            mux: &self.mux,
            git: &self.git,
            remote: &self.remote,
            github: &self.github,
            picker: &self.picker,
            cloner: &self.cloner,
        }
    }
}
