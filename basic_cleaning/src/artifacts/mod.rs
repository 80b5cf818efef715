//! Artifact store port and its implementations.
//!
//! The cleaning step never talks to a tracking backend directly; it is handed
//! an [`ArtifactStore`] and only resolves, publishes and records run metadata
//! through it.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for store operations
//! - [`store`]: The [`ArtifactStore`] trait and the records it exchanges
//! - [`stores`]: Filesystem-backed and in-memory implementations
//! - [`factory`]: Builds a store from [`crate::config::ArtifactSettings`]
//!
//! # Example
//!
//! ```no_run
//! use basic_cleaning::artifacts::{ArtifactStore, FilesystemArtifactStore};
//!
//! let store = FilesystemArtifactStore::new("artifacts");
//! let path = store.resolve("sample.csv:latest").expect("artifact exists");
//! println!("raw data at {}", path.display());
//! ```

pub mod error;
pub mod factory;
pub mod store;
pub mod stores;

pub use error::{ArtifactError, ArtifactResult};
pub use factory::{ArtifactStoreFactory, StoreBackend};
pub use store::{
    file_digest, ArtifactHandle, ArtifactRef, ArtifactSpec, ArtifactStore, RunMetadata,
};
pub use stores::{FilesystemArtifactStore, InMemoryArtifactStore};
