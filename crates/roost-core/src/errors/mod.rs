use std::error::Error;

/// Base trait for all roost errors
pub trait RoostError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as a warning rather than an error
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type RoostResult<T> = Result<T, Box<dyn RoostError>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Workspace '{name}' is not configured")]
    WorkspaceNotConfigured { name: String },

    #[error("No workspace selected and no default_workspace configured")]
    NoWorkspaceSelected,

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Config file already exists at '{path}'")]
    AlreadyExists { path: String },

    #[error("Could not determine home directory")]
    HomeDirNotFound,

    #[error("IO error on config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RoostError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::WorkspaceNotConfigured { .. } => "WORKSPACE_NOT_CONFIGURED",
            ConfigError::NoWorkspaceSelected => "NO_WORKSPACE_SELECTED",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::AlreadyExists { .. } => "CONFIG_ALREADY_EXISTS",
            ConfigError::HomeDirNotFound => "HOME_DIR_NOT_FOUND",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. }
                | ConfigError::WorkspaceNotConfigured { .. }
                | ConfigError::NoWorkspaceSelected
                | ConfigError::InvalidConfiguration { .. }
                | ConfigError::AlreadyExists { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roost_result() {
        let _result: RoostResult<i32> = Ok(42);
    }

    #[test]
    fn test_workspace_not_configured_display() {
        let error = ConfigError::WorkspaceNotConfigured {
            name: "ws".to_string(),
        };
        assert_eq!(error.to_string(), "Workspace 'ws' is not configured");
        assert_eq!(error.error_code(), "WORKSPACE_NOT_CONFIGURED");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_config_parse_error() {
        let error = ConfigError::ConfigParseError {
            path: "/tmp/config.toml".to_string(),
            message: "invalid TOML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse config file '/tmp/config.toml': invalid TOML syntax"
        );
        assert_eq!(error.error_code(), "CONFIG_PARSE_ERROR");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_io_error_is_not_user_error() {
        let error = ConfigError::IoError {
            path: "/tmp/config.toml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(error.to_string().contains("denied"));
        assert!(!error.is_user_error());
    }
}
