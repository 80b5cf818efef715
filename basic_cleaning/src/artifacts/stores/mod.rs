//! Artifact store implementations.

pub mod filesystem;
pub mod memory;

pub use filesystem::{FilesystemArtifactStore, RunRecord};
pub use memory::InMemoryArtifactStore;
