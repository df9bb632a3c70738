use crate::errors::RoostError;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Failed to serialize workspace cache: {message}")]
    SerializationFailed { message: String },

    #[error("Failed to write workspace cache '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove workspace cache '{path}': {source}")]
    ClearFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RoostError for CacheError {
    fn error_code(&self) -> &'static str {
        match self {
            CacheError::SerializationFailed { .. } => "CACHE_SERIALIZATION_FAILED",
            CacheError::WriteFailed { .. } => "CACHE_WRITE_FAILED",
            CacheError::ClearFailed { .. } => "CACHE_CLEAR_FAILED",
        }
    }
}
