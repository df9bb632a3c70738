use std::collections::BTreeMap;

use crate::config::{SessionPreset, WorkspaceConfig};
use crate::git::{GitInspector, RepoCloner};
use crate::picker::Picker;
use crate::remote::{GitHubService, RemoteRepoProvider};
use crate::tmux::{Multiplexer, SessionOutcome};

/// Collaborators and configuration for one invocation.
///
/// Built once by the caller and passed by reference into every flow.
pub struct SessionContext<'a> {
    pub workspace: &'a WorkspaceConfig,
    pub presets: &'a BTreeMap<String, SessionPreset>,
    pub mux: &'a dyn Multiplexer,
    pub git: &'a dyn GitInspector,
    pub remote: &'a dyn RemoteRepoProvider,
    pub github: &'a dyn GitHubService,
    pub picker: &'a dyn Picker,
    pub cloner: &'a dyn RepoCloner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Opened {
        project: String,
        outcome: SessionOutcome,
        cloned: bool,
    },
    /// A caller-supplied extra item was chosen.
    Extra { key: String },
    /// The user cancelled, or chose the informational error item.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenResult {
    pub project: String,
    pub session: String,
    pub outcome: SessionOutcome,
    pub cloned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveOutcome {
    Attached { session: String },
    NoneActive,
    Cancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseSummary {
    pub closed: Vec<String>,
    /// (session, error message)
    pub failed: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewProjectOptions {
    /// Create the GitHub repository and push an initial commit.
    pub publish: bool,
    pub private: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Opened {
        project: String,
        file: String,
        outcome: SessionOutcome,
        cloned: bool,
    },
    NoResults,
    Cancelled,
}
