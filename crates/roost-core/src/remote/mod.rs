//! GitHub access: repository listing for the catalog, plus repository
//! creation, code search, workflow runs and pull requests.

pub mod backends;
pub mod errors;
pub mod registry;
pub mod traits;
pub mod types;

pub use backends::{ApiProvider, GhCliProvider, RestClient};
pub use errors::RemoteError;
pub use registry::{get_github_service, get_provider};
pub use traits::{GitHubService, RemoteRepoProvider};
pub use types::{BranchStatus, CodeMatch, PullRequestSummary, RunState, WorkflowRun};
