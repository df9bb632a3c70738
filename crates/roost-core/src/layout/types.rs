use std::path::PathBuf;

use crate::config::Orientation;

use super::errors::LayoutError;

/// `project[:file[:extra]]` as typed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSelector {
    pub project: String,
    pub file: Option<String>,
    /// Extra editor arguments. May itself contain `:`.
    pub extra: Option<String>,
}

impl ProjectSelector {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Default::default()
        }
    }

    pub fn parse(selector: &str) -> Result<Self, LayoutError> {
        let mut parts = selector.splitn(3, ':');
        let project = parts.next().unwrap_or_default().trim();

        if project.is_empty() {
            return Err(LayoutError::InvalidSelector {
                selector: selector.to_string(),
                message: "project name is empty".to_string(),
            });
        }
        if project.contains('/') || project == "." || project == ".." {
            return Err(LayoutError::InvalidSelector {
                selector: selector.to_string(),
                message: "project must be a directory name, not a path".to_string(),
            });
        }

        let non_empty = |part: Option<&str>| part.filter(|s| !s.is_empty()).map(str::to_string);

        Ok(Self {
            project: project.to_string(),
            file: non_empty(parts.next()),
            extra: non_empty(parts.next()),
        })
    }
}

/// Concrete session layout ready for the multiplexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLayoutPlan {
    pub base_path: PathBuf,
    pub windows: Vec<WindowPlan>,
}

impl SessionLayoutPlan {
    pub fn pane_count(&self) -> usize {
        self.windows.iter().map(|w| w.panes.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowPlan {
    pub name: String,
    pub layout: Option<String>,
    pub path: PathBuf,
    pub panes: Vec<PanePlan>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanePlan {
    /// Empty leaves the pane idle.
    pub command: String,
    pub orientation: Orientation,
    pub size: Option<u8>,
    pub path: PathBuf,
}
