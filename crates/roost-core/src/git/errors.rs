use crate::errors::RoostError;

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("Repository not found at path: {path}")]
    RepositoryNotFound { path: String },

    #[error("HEAD of '{path}' does not point at a branch")]
    NoBranch { path: String },

    #[error("git executable not found on PATH")]
    GitNotFound,

    #[error("Cannot clone into '{path}': destination already exists")]
    DestinationExists { path: String },

    #[error("Failed to clone '{url}': {message}")]
    CloneFailed { url: String, message: String },

    #[error("Git operation failed: {message}")]
    OperationFailed { message: String },

    #[error("Git2 library error: {source}")]
    Git2Error {
        #[from]
        source: git2::Error,
    },

    #[error("IO error during git operation: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl RoostError for GitError {
    fn error_code(&self) -> &'static str {
        match self {
            GitError::RepositoryNotFound { .. } => "REPOSITORY_NOT_FOUND",
            GitError::NoBranch { .. } => "GIT_NO_BRANCH",
            GitError::GitNotFound => "GIT_NOT_FOUND",
            GitError::DestinationExists { .. } => "CLONE_DESTINATION_EXISTS",
            GitError::CloneFailed { .. } => "GIT_CLONE_FAILED",
            GitError::OperationFailed { .. } => "GIT_OPERATION_FAILED",
            GitError::Git2Error { .. } => "GIT2_ERROR",
            GitError::IoError { .. } => "GIT_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            GitError::GitNotFound
                | GitError::DestinationExists { .. }
                | GitError::OperationFailed { .. }
        )
    }
}
