//! Basic cleaning step for raw rental listings.
//!
//! Loads a raw CSV artifact, drops rows outside the configured price range and
//! the geographic bounding box, normalizes `last_review` to a timestamp and
//! publishes the result as a new artifact version.

pub mod artifacts;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod time;
pub mod transformations;

pub use artifacts::{ArtifactHandle, ArtifactSpec, ArtifactStore, RunMetadata};
pub use config::CleaningSettings;
pub use crate::core::domain::{GeoBounds, PriceRange, RunConfiguration};
pub use error::{CleaningError, CleaningResult, Stage};
pub use preprocessing::{CleaningPipeline, CleaningReport};
