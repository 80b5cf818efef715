pub mod pipeline;

pub use pipeline::{CleanedFrames, CleaningPipeline, CleaningReport};
