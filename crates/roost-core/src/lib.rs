//! roost-core: Core library for tmux workspaces over local and remote projects
//!
//! A workspace is a root directory whose immediate subdirectories are
//! projects. This library builds the project catalog, opens projects as
//! tmux sessions from layout presets, and keeps a per-workspace cache of
//! git facts, remote repository names, and usage counters.
//!
//! # Main Entry Points
//!
//! - [`sessions`] - Pick, open, create, attach, and close project sessions
//! - [`remote`] - GitHub listing, search, workflow runs, and pull requests
//! - [`catalog`] - Build the ordered list of pickable projects
//! - [`config`] - Configuration loading and workspace selection
//! - [`cache`] - Per-workspace cache persistence
//! - [`tmux`] - Multiplexer abstraction and layout materialization

pub mod cache;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod events;
pub mod git;
pub mod layout;
pub mod logging;
pub mod picker;
pub mod remote;
pub mod sessions;
pub mod tmux;
pub mod usage;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types at crate root for convenience
pub use cache::{CacheError, CacheStats, WorkspaceCacheFile};
pub use catalog::{Catalog, CatalogItem, ItemKind};
pub use config::{RoostConfig, WorkspaceConfig};
pub use errors::RoostError;
pub use git::{Git2Inspector, GitCliCloner, GitInspector, RepoCloner};
pub use layout::{LayoutError, ProjectSelector, SessionLayoutPlan};
pub use picker::{Picker, PickerError, PickerItem};
pub use remote::{GitHubService, RemoteRepoProvider, get_github_service, get_provider};
pub use sessions::{
    ActiveOutcome, CloseSummary, NewProjectOptions, OpenResult, PickOutcome, SearchOutcome,
    SessionContext, SessionError,
};
pub use tmux::{Multiplexer, SessionOutcome, TmuxExecutor, TmuxMultiplexer};

// Re-export handler modules as the primary API
pub use sessions::handler as session_ops;

// Re-export logging initialization
pub use logging::init_logging;
