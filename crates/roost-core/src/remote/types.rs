use std::fmt;

use serde::Serialize;

/// One code search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeMatch {
    /// Repository name without the owner.
    pub repo: String,
    pub path: String,
    /// First text-match fragment, empty when GitHub returned none.
    pub fragment: String,
    /// File extension without the dot, empty when the path has none.
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Success,
    InProgress,
    Failed,
}

impl RunState {
    /// Classify a workflow run from its `status` and `conclusion` fields.
    pub fn from_api(status: &str, conclusion: Option<&str>) -> Self {
        if status != "completed" {
            return RunState::InProgress;
        }
        match conclusion {
            Some("success") => RunState::Success,
            _ => RunState::Failed,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            RunState::Success => "🟢",
            RunState::InProgress => "🟡",
            RunState::Failed => "🔴",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Success => write!(f, "success"),
            RunState::InProgress => write!(f, "in progress"),
            RunState::Failed => write!(f, "failed"),
        }
    }
}

/// Latest run of a workflow on one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowRun {
    pub state: RunState,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchStatus {
    pub branch: String,
    /// `None` when the workflow never ran on the branch.
    pub run: Option<WorkflowRun>,
}

impl fmt::Display for BranchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.run {
            Some(run) => write!(f, "{} {}", self.branch, run.state.symbol()),
            None => write!(f, "{} (no runs)", self.branch),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub author: String,
    pub draft: bool,
}
