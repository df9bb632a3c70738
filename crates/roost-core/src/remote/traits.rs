use super::errors::RemoteError;
use super::types::{CodeMatch, PullRequestSummary, WorkflowRun};

/// Lists repository names owned by a GitHub user or organisation.
pub trait RemoteRepoProvider: Send + Sync {
    /// Short backend name for logs, e.g. "api".
    fn name(&self) -> &'static str;

    fn list_repo_names(&self, owner: &str, is_org: bool) -> Result<Vec<String>, RemoteError>;
}

/// GitHub operations beyond listing: repository creation, code search,
/// workflow runs and pull requests.
pub trait GitHubService: Send + Sync {
    /// Create `name` under an organisation, or under the authenticated user
    /// when `is_org` is false. Returns the repository name GitHub assigned.
    fn create_repo(
        &self,
        owner: &str,
        is_org: bool,
        name: &str,
        private: bool,
    ) -> Result<String, RemoteError>;

    fn search_code(
        &self,
        owner: &str,
        is_org: bool,
        terms: &str,
    ) -> Result<Vec<CodeMatch>, RemoteError>;

    /// Most recent run of `workflow` (a file name such as `deploy.yaml`) on
    /// `branch`. `None` when it never ran there or the workflow is unknown.
    fn latest_workflow_run(
        &self,
        owner: &str,
        repo: &str,
        workflow: &str,
        branch: &str,
    ) -> Result<Option<WorkflowRun>, RemoteError>;

    fn open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<PullRequestSummary>, RemoteError>;
}
