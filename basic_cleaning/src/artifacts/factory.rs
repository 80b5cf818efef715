//! Artifact store factory for dependency injection.
//!
//! The cleaning pipeline only sees `&dyn ArtifactStore`; this module decides
//! which implementation backs it at runtime.

use std::str::FromStr;

use super::error::{ArtifactError, ArtifactResult};
use super::store::ArtifactStore;
use super::stores::{FilesystemArtifactStore, InMemoryArtifactStore};
use crate::config::ArtifactSettings;

/// Artifact store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Versioned directories under a root path
    Filesystem,
    /// Process-local store, nothing is persisted
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ArtifactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filesystem" | "fs" | "local" => Ok(Self::Filesystem),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(ArtifactError::Configuration(format!(
                "Unknown artifact backend: {}",
                other
            ))),
        }
    }
}

/// Creates artifact store instances from settings.
pub struct ArtifactStoreFactory;

impl ArtifactStoreFactory {
    pub fn create(settings: &ArtifactSettings) -> ArtifactResult<Box<dyn ArtifactStore>> {
        let backend: StoreBackend = settings.backend.parse()?;
        log::debug!(
            "Creating {:?} artifact store (root {})",
            backend,
            settings.root.display()
        );

        let store: Box<dyn ArtifactStore> = match backend {
            StoreBackend::Filesystem => Box::new(FilesystemArtifactStore::new(&settings.root)),
            StoreBackend::Memory => Box::new(InMemoryArtifactStore::new()),
        };
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("filesystem".parse::<StoreBackend>().unwrap(), StoreBackend::Filesystem);
        assert_eq!("Memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("s3".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_create_memory_store_starts_empty() {
        let settings = ArtifactSettings {
            backend: "memory".to_string(),
            root: PathBuf::from("unused"),
        };
        let store = ArtifactStoreFactory::create(&settings).unwrap();
        assert!(store.resolve("sample.csv").is_err());
    }
}
