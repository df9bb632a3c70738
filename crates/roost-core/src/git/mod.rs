pub mod cli;
pub mod collector;
pub mod errors;
pub mod inspector;
pub mod scaffold;
pub mod types;

pub use cli::{GitCliCloner, RepoCloner, clone_repo, clone_url, push_upstream, validate_git_arg};
pub use collector::{MAX_GIT_WORKERS, collect_git_info, collect_git_info_with};
pub use errors::GitError;
pub use inspector::{Git2Inspector, GitInspector, inspect};
pub use scaffold::{INITIAL_BRANCH, init_published_project};
pub use types::{GitTarget, RepoGitInfo, RepoStatus};
