//! Error types for the cleaning step.
//!
//! Every fatal error carries the pipeline stage it came from so the CLI can
//! report where a run stopped.

use std::fmt;
use std::path::PathBuf;

use crate::artifacts::ArtifactError;

/// Result type for cleaning operations
pub type CleaningResult<T> = Result<T, CleaningError>;

/// Pipeline stage a fatal error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Resolve,
    Parse,
    Filter,
    Write,
    Publish,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Config => "config",
            Stage::Resolve => "resolve",
            Stage::Parse => "parse",
            Stage::Filter => "filter",
            Stage::Write => "write",
            Stage::Publish => "publish",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for the cleaning step
#[derive(Debug, thiserror::Error)]
pub enum CleaningError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Artifact not found: {name}")]
    ArtifactNotFound { name: String },

    #[error("Failed to resolve artifact '{name}': {message}")]
    Resolve { name: String, message: String },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Filtering failed: {0}")]
    Filter(String),

    #[error("Failed to write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    #[error("Failed to publish artifact '{name}': {message}")]
    Publish { name: String, message: String },
}

impl CleaningError {
    pub fn stage(&self) -> Stage {
        match self {
            CleaningError::Configuration(_) => Stage::Config,
            CleaningError::ArtifactNotFound { .. } | CleaningError::Resolve { .. } => {
                Stage::Resolve
            }
            CleaningError::Parse { .. } | CleaningError::MissingColumn { .. } => Stage::Parse,
            CleaningError::Filter(_) => Stage::Filter,
            CleaningError::Write { .. } => Stage::Write,
            CleaningError::Publish { .. } => Stage::Publish,
        }
    }

    /// Map a store error raised while resolving the input artifact.
    pub fn from_resolve(name: &str, err: ArtifactError) -> Self {
        match err {
            ArtifactError::NotFound(_) => CleaningError::ArtifactNotFound {
                name: name.to_string(),
            },
            other => CleaningError::Resolve {
                name: name.to_string(),
                message: other.to_string(),
            },
        }
    }

    /// Map a store error raised while registering the output artifact.
    pub fn from_publish(name: &str, err: ArtifactError) -> Self {
        CleaningError::Publish {
            name: name.to_string(),
            message: err.to_string(),
        }
    }
}
