//! Cleaning step settings file support.
//!
//! Settings that are not part of the per-run configuration (job type, output
//! file, artifact backend, bounding box) are read from an optional TOML file
//! and can be overridden from the environment.
//!
//! ```toml
//! job_type = "basic_cleaning"
//! output_file = "clean_sample.csv"
//!
//! [artifacts]
//! backend = "filesystem"
//! root = "artifacts"
//!
//! [geo]
//! min_longitude = -74.25
//! max_longitude = -73.50
//! min_latitude = 40.5
//! max_latitude = 41.2
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::domain::GeoBounds;
use crate::error::{CleaningError, CleaningResult};

/// File name searched for in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "basic_cleaning.toml";

/// Settings for the cleaning step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningSettings {
    #[serde(default = "default_job_type")]
    pub job_type: String,
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
    #[serde(default)]
    pub artifacts: ArtifactSettings,
    #[serde(default)]
    pub geo: GeoBounds,
}

/// Artifact backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSettings {
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_artifact_root")]
    pub root: PathBuf,
}

fn default_job_type() -> String {
    "basic_cleaning".to_string()
}

fn default_output_file() -> PathBuf {
    PathBuf::from("clean_sample.csv")
}

fn default_backend() -> String {
    "filesystem".to_string()
}

fn default_artifact_root() -> PathBuf {
    PathBuf::from("artifacts")
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            root: default_artifact_root(),
        }
    }
}

impl Default for CleaningSettings {
    fn default() -> Self {
        Self {
            job_type: default_job_type(),
            output_file: default_output_file(),
            artifacts: ArtifactSettings::default(),
            geo: GeoBounds::default(),
        }
    }
}

impl CleaningSettings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CleaningResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CleaningError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> CleaningResult<Self> {
        toml::from_str(content).map_err(|e| {
            CleaningError::Configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Resolve settings for a run.
    ///
    /// Uses `path` when given (it must exist), otherwise `basic_cleaning.toml`
    /// in the working directory if present, otherwise defaults. Environment
    /// overrides are applied last.
    pub fn load(path: Option<&Path>) -> CleaningResult<Self> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        Ok(settings.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply `ARTIFACT_ROOT` and `ARTIFACT_BACKEND` overrides read through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup("ARTIFACT_ROOT").filter(|s| !s.trim().is_empty()) {
            self.artifacts.root = PathBuf::from(root);
        }
        if let Some(backend) = lookup("ARTIFACT_BACKEND").filter(|s| !s.trim().is_empty()) {
            self.artifacts.backend = backend;
        }
        self
    }
}
