//! Error types for artifact store operations.

/// Result type for artifact store operations
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Error type for artifact store operations
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid artifact reference: {0}")]
    InvalidReference(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ArtifactError {
    fn from(err: serde_json::Error) -> Self {
        ArtifactError::Manifest(err.to_string())
    }
}
