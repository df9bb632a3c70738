use crate::errors::RoostError;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Session preset '{name}' not found")]
    PresetNotFound { name: String },

    #[error("Workspace '{workspace}' has neither session_preset nor an inline session")]
    NoLayout { workspace: String },

    #[error("Session layout for '{name}' has no windows")]
    EmptyLayout { name: String },

    #[error("Invalid project selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

impl RoostError for LayoutError {
    fn error_code(&self) -> &'static str {
        match self {
            LayoutError::PresetNotFound { .. } => "PRESET_NOT_FOUND",
            LayoutError::NoLayout { .. } => "NO_SESSION_LAYOUT",
            LayoutError::EmptyLayout { .. } => "EMPTY_SESSION_LAYOUT",
            LayoutError::InvalidSelector { .. } => "INVALID_PROJECT_SELECTOR",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
