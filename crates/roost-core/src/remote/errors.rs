use crate::errors::RoostError;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("GitHub access requires remote_owner for workspace '{workspace}'")]
    OwnerNotConfigured { workspace: String },

    #[error("GitHub request for '{owner}' failed: {message}")]
    RequestFailed { owner: String, message: String },

    #[error("GitHub returned errors for '{owner}': {message}")]
    QueryFailed { owner: String, message: String },

    #[error("'{command}' not found on PATH")]
    CommandNotFound { command: String },

    #[error("'{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("Failed to parse repository list from {source_name}: {message}")]
    ParseFailed { source_name: String, message: String },

    #[error("{operation} requires a GitHub token in GITHUB_AUTH")]
    TokenRequired { operation: String },

    #[error("GitHub rejected {operation} ({status}): {message}")]
    ApiStatus {
        operation: String,
        status: u16,
        message: String,
    },
}

impl RoostError for RemoteError {
    fn error_code(&self) -> &'static str {
        match self {
            RemoteError::OwnerNotConfigured { .. } => "REMOTE_OWNER_NOT_CONFIGURED",
            RemoteError::RequestFailed { .. } => "REMOTE_REQUEST_FAILED",
            RemoteError::QueryFailed { .. } => "REMOTE_QUERY_FAILED",
            RemoteError::CommandNotFound { .. } => "REMOTE_COMMAND_NOT_FOUND",
            RemoteError::CommandFailed { .. } => "REMOTE_COMMAND_FAILED",
            RemoteError::ParseFailed { .. } => "REMOTE_PARSE_FAILED",
            RemoteError::TokenRequired { .. } => "REMOTE_TOKEN_REQUIRED",
            RemoteError::ApiStatus { .. } => "REMOTE_API_STATUS",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            RemoteError::OwnerNotConfigured { .. }
                | RemoteError::CommandNotFound { .. }
                | RemoteError::TokenRequired { .. }
        )
    }
}
