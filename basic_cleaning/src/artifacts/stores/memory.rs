//! In-memory artifact store.
//!
//! Keeps artifact versions as paths to files the caller owns, which makes it
//! suitable for unit tests and dry runs that must not touch a shared store.
//! Publishing can be switched to fail to exercise error paths.

use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::artifacts::error::{ArtifactError, ArtifactResult};
use crate::artifacts::store::{
    file_digest, ArtifactHandle, ArtifactRef, ArtifactSpec, ArtifactStore, RunMetadata,
};

/// In-memory artifact store.
///
/// # Example
/// ```
/// use basic_cleaning::artifacts::{ArtifactStore, InMemoryArtifactStore};
///
/// let store = InMemoryArtifactStore::new();
/// store.insert("sample.csv", "/data/sample.csv");
/// assert!(store.resolve("sample.csv:latest").is_ok());
/// assert!(store.resolve("other.csv").is_err());
/// ```
#[derive(Clone, Default)]
pub struct InMemoryArtifactStore {
    data: Arc<RwLock<MemoryData>>,
}

#[derive(Default)]
struct MemoryData {
    // name -> versions, index == version number
    artifacts: HashMap<String, Vec<PathBuf>>,
    published: Vec<ArtifactHandle>,
    runs: Vec<RunMetadata>,
    fail_publish: bool,
}

impl InMemoryArtifactStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` as the next version of `name` without publishing it.
    ///
    /// Used to seed raw inputs. Returns the assigned version.
    pub fn insert(&self, name: &str, path: impl Into<PathBuf>) -> u32 {
        let mut data = self.write();
        let versions = data.artifacts.entry(name.to_string()).or_default();
        versions.push(path.into());
        (versions.len() - 1) as u32
    }

    /// Make every subsequent `publish` fail.
    pub fn set_fail_publish(&self, fail: bool) {
        self.write().fail_publish = fail;
    }

    /// Artifacts published through this store, oldest first.
    pub fn published(&self) -> Vec<ArtifactHandle> {
        self.read().published.clone()
    }

    /// Run metadata recorded through this store, oldest first.
    pub fn runs(&self) -> Vec<RunMetadata> {
        self.read().runs.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, MemoryData> {
        // A panic while holding the lock leaves plain data behind; keep using it
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, MemoryData> {
        self.data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn resolve(&self, name: &str) -> ArtifactResult<PathBuf> {
        let reference = ArtifactRef::parse(name)?;
        let data = self.read();
        let versions = data
            .artifacts
            .get(&reference.name)
            .ok_or_else(|| ArtifactError::NotFound(name.to_string()))?;

        let path = match reference.version {
            Some(version) => versions.get(version as usize),
            None => versions.last(),
        };
        path.cloned()
            .ok_or_else(|| ArtifactError::NotFound(name.to_string()))
    }

    fn publish(&self, spec: &ArtifactSpec, file: &Path) -> ArtifactResult<ArtifactHandle> {
        if self.read().fail_publish {
            return Err(ArtifactError::Storage(
                "publishing is disabled for this store".to_string(),
            ));
        }

        let digest = file_digest(file)?;
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let mut data = self.write();
        let versions = data.artifacts.entry(spec.name.clone()).or_default();
        versions.push(file.to_path_buf());
        let version = (versions.len() - 1) as u32;

        let handle = ArtifactHandle {
            name: spec.name.clone(),
            version,
            artifact_type: spec.artifact_type.clone(),
            description: spec.description.clone(),
            file_name,
            digest,
            location: file.to_path_buf(),
            created_at: Utc::now(),
        };
        data.published.push(handle.clone());
        Ok(handle)
    }

    fn record_run_metadata(&self, metadata: &RunMetadata) -> ArtifactResult<()> {
        self.write().runs.push(metadata.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_resolve_pinned_and_latest() {
        let store = InMemoryArtifactStore::new();
        assert_eq!(store.insert("sample.csv", "/tmp/a.csv"), 0);
        assert_eq!(store.insert("sample.csv", "/tmp/b.csv"), 1);

        assert_eq!(
            store.resolve("sample.csv:v0").unwrap(),
            PathBuf::from("/tmp/a.csv")
        );
        assert_eq!(
            store.resolve("sample.csv:latest").unwrap(),
            PathBuf::from("/tmp/b.csv")
        );
        assert!(matches!(
            store.resolve("sample.csv:v7"),
            Err(ArtifactError::NotFound(_))
        ));
    }

    #[test]
    fn test_publish_records_handle() {
        let store = InMemoryArtifactStore::new();
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "price\n10\n").unwrap();

        let spec = ArtifactSpec::new("clean_sample.csv", "clean_sample", "cleaned");
        let handle = store.publish(&spec, file.path()).unwrap();

        assert_eq!(handle.version, 0);
        assert_eq!(handle.digest.len(), 64);
        assert_eq!(store.published().len(), 1);
        assert_eq!(store.resolve("clean_sample.csv").unwrap(), file.path());
    }

    #[test]
    fn test_failing_publish() {
        let store = InMemoryArtifactStore::new();
        store.set_fail_publish(true);
        let file = NamedTempFile::new().unwrap();

        let spec = ArtifactSpec::new("clean_sample.csv", "clean_sample", "cleaned");
        assert!(store.publish(&spec, file.path()).is_err());
        assert!(store.published().is_empty());
    }
}
