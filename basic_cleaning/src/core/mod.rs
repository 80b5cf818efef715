//! Core domain models for the cleaning step.
//!
//! This module defines the run configuration supplied for one invocation and
//! the row predicates (price range, geographic bounding box) applied to the
//! raw listings table.

pub mod domain;
