use crate::errors::RoostError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Workspace directory '{path}' does not exist")]
    WorkspaceRootMissing { path: String },

    #[error("Project '{name}' does not exist in '{root}' and is not a known remote repository")]
    ProjectNotFound { name: String, root: String },

    #[error("Workspace '{workspace}' has an empty prefix; refusing to close every session")]
    EmptyPrefix { workspace: String },

    #[error("Cannot clone '{name}': workspace has no remote_owner")]
    CloneUnavailable { name: String },

    #[error("Cannot create project: '{path}' already exists")]
    ProjectExists { path: String },

    #[error("Failed to read workspace directory '{path}': {source}")]
    ReadWorkspace {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Layout error: {source}")]
    Layout {
        #[from]
        source: crate::layout::LayoutError,
    },

    #[error("tmux error: {source}")]
    Tmux {
        #[from]
        source: crate::tmux::TmuxError,
    },

    #[error("Git error: {source}")]
    Git {
        #[from]
        source: crate::git::GitError,
    },

    #[error("Picker error: {source}")]
    Picker {
        #[from]
        source: crate::picker::PickerError,
    },

    #[error("Cache error: {source}")]
    Cache {
        #[from]
        source: crate::cache::CacheError,
    },

    #[error("GitHub error: {source}")]
    Remote {
        #[from]
        source: crate::remote::RemoteError,
    },

    #[error("Failed to create project directory '{path}': {source}")]
    CreateProject {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RoostError for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            SessionError::WorkspaceRootMissing { .. } => "WORKSPACE_ROOT_MISSING",
            SessionError::ProjectNotFound { .. } => "PROJECT_NOT_FOUND",
            SessionError::EmptyPrefix { .. } => "EMPTY_WORKSPACE_PREFIX",
            SessionError::CloneUnavailable { .. } => "CLONE_UNAVAILABLE",
            SessionError::ReadWorkspace { .. } => "READ_WORKSPACE_FAILED",
            SessionError::ProjectExists { .. } => "PROJECT_EXISTS",
            SessionError::CreateProject { .. } => "CREATE_PROJECT_FAILED",
            SessionError::Layout { source } => source.error_code(),
            SessionError::Tmux { source } => source.error_code(),
            SessionError::Git { source } => source.error_code(),
            SessionError::Picker { source } => source.error_code(),
            SessionError::Cache { source } => source.error_code(),
            SessionError::Remote { source } => source.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            SessionError::WorkspaceRootMissing { .. }
            | SessionError::ProjectNotFound { .. }
            | SessionError::EmptyPrefix { .. }
            | SessionError::CloneUnavailable { .. }
            | SessionError::ProjectExists { .. } => true,
            SessionError::ReadWorkspace { .. } | SessionError::CreateProject { .. } => false,
            SessionError::Layout { source } => source.is_user_error(),
            SessionError::Tmux { source } => source.is_user_error(),
            SessionError::Git { source } => source.is_user_error(),
            SessionError::Picker { source } => source.is_user_error(),
            SessionError::Cache { source } => source.is_user_error(),
            SessionError::Remote { source } => source.is_user_error(),
        }
    }
}
