//! The artifact store trait and the records passed across it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ArtifactError, ArtifactResult};
use crate::core::domain::RunConfiguration;

/// Narrow capability the cleaning step uses to talk to the artifact store.
///
/// Implementations are synchronous; one run drives the store from a single
/// thread from start to finish.
pub trait ArtifactStore {
    /// Resolve an artifact reference (`name`, `name:latest` or `name:vN`) to a
    /// readable local file.
    fn resolve(&self, name: &str) -> ArtifactResult<PathBuf>;

    /// Register `file` as a new version of the artifact described by `spec`.
    fn publish(&self, spec: &ArtifactSpec, file: &Path) -> ArtifactResult<ArtifactHandle>;

    /// Attach the configuration of the current run for traceability.
    fn record_run_metadata(&self, metadata: &RunMetadata) -> ArtifactResult<()>;

    /// Close the current run. Later resolves and publishes are not attributed to it.
    fn finish_run(&self) -> ArtifactResult<()> {
        Ok(())
    }
}

/// Name, type and description of an artifact about to be published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub description: String,
}

impl ArtifactSpec {
    pub fn new(
        name: impl Into<String>,
        artifact_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            artifact_type: artifact_type.into(),
            description: description.into(),
        }
    }
}

/// A published artifact version, as returned by [`ArtifactStore::publish`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactHandle {
    pub name: String,
    pub version: u32,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub description: String,
    pub file_name: String,
    /// Hex-encoded SHA-256 of the attached file.
    pub digest: String,
    /// Where the store keeps the attached file.
    pub location: PathBuf,
    pub created_at: DateTime<Utc>,
}

impl ArtifactHandle {
    /// Fully qualified reference, e.g. `clean_sample.csv:v2`.
    pub fn reference(&self) -> String {
        format!("{}:v{}", self.name, self.version)
    }
}

impl fmt::Display for ArtifactHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.reference(), self.artifact_type)
    }
}

/// Configuration recorded for one run, tagged with its job type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub job_type: String,
    pub started_at: DateTime<Utc>,
    pub config: RunConfiguration,
}

impl RunMetadata {
    pub fn new(job_type: impl Into<String>, config: RunConfiguration) -> Self {
        Self {
            job_type: job_type.into(),
            started_at: Utc::now(),
            config,
        }
    }
}

/// Parsed artifact reference.
///
/// `version == None` means "latest".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub name: String,
    pub version: Option<u32>,
}

impl ArtifactRef {
    /// Parse `name`, `name:latest` or `name:vN`.
    ///
    /// # Examples
    ///
    /// ```
    /// use basic_cleaning::artifacts::ArtifactRef;
    ///
    /// let latest = ArtifactRef::parse("sample.csv:latest").unwrap();
    /// assert_eq!(latest.name, "sample.csv");
    /// assert_eq!(latest.version, None);
    ///
    /// let pinned = ArtifactRef::parse("sample.csv:v3").unwrap();
    /// assert_eq!(pinned.version, Some(3));
    /// ```
    pub fn parse(reference: &str) -> ArtifactResult<Self> {
        let reference = reference.trim();
        let (name, alias) = match reference.rsplit_once(':') {
            Some((name, alias)) => (name, Some(alias)),
            None => (reference, None),
        };

        if name.is_empty() {
            return Err(ArtifactError::InvalidReference(reference.to_string()));
        }

        let version = match alias {
            None | Some("latest") => None,
            Some(alias) => {
                let number = alias
                    .strip_prefix('v')
                    .and_then(|n| n.parse::<u32>().ok())
                    .ok_or_else(|| ArtifactError::InvalidReference(reference.to_string()))?;
                Some(number)
            }
        };

        Ok(Self {
            name: name.to_string(),
            version,
        })
    }
}

/// Hex-encoded SHA-256 digest of a file's contents.
pub fn file_digest(path: &Path) -> ArtifactResult<String> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_bare_name_is_latest() {
        let reference = ArtifactRef::parse("sample.csv").unwrap();
        assert_eq!(reference.name, "sample.csv");
        assert_eq!(reference.version, None);
    }

    #[test]
    fn test_parse_rejects_unknown_alias() {
        assert!(matches!(
            ArtifactRef::parse("sample.csv:prod"),
            Err(ArtifactError::InvalidReference(_))
        ));
        assert!(ArtifactRef::parse(":v1").is_err());
    }

    #[test]
    fn test_file_digest_matches_known_value() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "abc").unwrap();
        let digest = file_digest(file.path()).unwrap();
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
