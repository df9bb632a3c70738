use crate::errors::RoostError;

#[derive(Debug, thiserror::Error)]
pub enum TmuxError {
    #[error("tmux not found on PATH")]
    BinaryNotFound,

    #[error("tmux {command} failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("tmux {command} returned unexpected output: '{output}'")]
    UnexpectedOutput { command: String, output: String },

    #[error("Failed to run tmux {command}: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl RoostError for TmuxError {
    fn error_code(&self) -> &'static str {
        match self {
            TmuxError::BinaryNotFound => "TMUX_NOT_FOUND",
            TmuxError::CommandFailed { .. } => "TMUX_COMMAND_FAILED",
            TmuxError::UnexpectedOutput { .. } => "TMUX_UNEXPECTED_OUTPUT",
            TmuxError::Io { .. } => "TMUX_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, TmuxError::BinaryNotFound)
    }
}
