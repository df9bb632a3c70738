use crate::errors::RoostError;

#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    #[error("Interactive picker requires a terminal")]
    NotATerminal,

    #[error("Picker terminal error: {source}")]
    Terminal {
        #[from]
        source: std::io::Error,
    },
}

impl RoostError for PickerError {
    fn error_code(&self) -> &'static str {
        match self {
            PickerError::NotATerminal => "PICKER_NOT_A_TERMINAL",
            PickerError::Terminal { .. } => "PICKER_TERMINAL_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, PickerError::NotATerminal)
    }
}
