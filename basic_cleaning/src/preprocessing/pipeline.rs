use log::{info, warn};
use polars::prelude::*;
use std::path::PathBuf;

use crate::artifacts::{ArtifactHandle, ArtifactSpec, ArtifactStore, RunMetadata};
use crate::config::CleaningSettings;
use crate::core::domain::{GeoBounds, RunConfiguration};
use crate::error::{CleaningError, CleaningResult};
use crate::io::writers::write_clean_csv;
use crate::parsing::csv_parser;
use crate::transformations::cleaning::{normalize_last_review, ReviewDateSummary};
use crate::transformations::filtering::{filter_by_geo_bounds, filter_by_price};

/// Result of a cleaning run
#[derive(Debug, Clone)]
pub struct CleaningReport {
    pub input_path: PathBuf,
    pub rows_loaded: usize,
    pub columns: usize,
    pub rows_after_price: usize,
    pub rows_after_geo: usize,
    pub review_dates: ReviewDateSummary,
    pub output_path: PathBuf,
    pub artifact: ArtifactHandle,
}

impl CleaningReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_loaded - self.rows_after_geo
    }
}

/// Intermediate tables of one run, in pipeline order
#[derive(Debug, Clone)]
pub struct CleanedFrames {
    pub raw: DataFrame,
    pub price_filtered: DataFrame,
    pub cleaned: DataFrame,
    pub review_dates: ReviewDateSummary,
}

/// The cleaning step: resolve, parse, filter, normalize, write, publish
pub struct CleaningPipeline<'a> {
    store: &'a dyn ArtifactStore,
    job_type: String,
    geo_bounds: GeoBounds,
    output_file: PathBuf,
}

impl<'a> CleaningPipeline<'a> {
    /// Create a pipeline with default settings
    pub fn new(store: &'a dyn ArtifactStore) -> Self {
        Self::with_settings(store, &CleaningSettings::default())
    }

    /// Create a pipeline with custom settings
    pub fn with_settings(store: &'a dyn ArtifactStore, settings: &CleaningSettings) -> Self {
        Self {
            store,
            job_type: settings.job_type.clone(),
            geo_bounds: settings.geo,
            output_file: settings.output_file.clone(),
        }
    }

    /// Write the cleaned CSV to `path` instead of the configured file
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    /// Run the step end to end.
    ///
    /// Any error aborts the run; nothing is published after a failure, although
    /// the local output file may already exist.
    pub fn run(&self, config: &RunConfiguration) -> CleaningResult<CleaningReport> {
        // Step 1: Register the run configuration
        self.store
            .record_run_metadata(&RunMetadata::new(self.job_type.clone(), config.clone()))
            .map_err(|e| CleaningError::from_publish(&config.output_artifact, e))?;

        // Step 2: Resolve the input artifact
        let input_path = self
            .store
            .resolve(&config.input_artifact)
            .map_err(|e| CleaningError::from_resolve(&config.input_artifact, e))?;
        info!(
            "Resolved input artifact {} to {}",
            config.input_artifact,
            input_path.display()
        );

        // Step 3: Parse, filter, normalize
        let raw = csv_parser::parse_listings_csv(&input_path)?;
        let frames = self.clean(raw, config)?;

        // Step 4: Write the local file
        let mut cleaned = frames.cleaned;
        write_clean_csv(
            &mut cleaned,
            &self.output_file,
            frames.review_dates.output_format(),
        )?;
        info!("Saved cleaned file: {}", self.output_file.display());

        // Step 5: Publish
        let spec = ArtifactSpec::new(
            config.output_artifact.clone(),
            config.output_type.clone(),
            config.output_description.clone(),
        );
        let artifact = self
            .store
            .publish(&spec, &self.output_file)
            .map_err(|e| CleaningError::from_publish(&config.output_artifact, e))?;
        info!("Logged artifact {}", artifact);
        self.store
            .finish_run()
            .map_err(|e| CleaningError::from_publish(&config.output_artifact, e))?;

        Ok(CleaningReport {
            input_path,
            rows_loaded: frames.raw.height(),
            columns: frames.raw.width(),
            rows_after_price: frames.price_filtered.height(),
            rows_after_geo: cleaned.height(),
            review_dates: frames.review_dates,
            output_path: self.output_file.clone(),
            artifact,
        })
    }

    /// Apply the price filter, then the geographic filter, then normalize
    /// `last_review`. Does not touch the store or the filesystem.
    pub fn clean(&self, raw: DataFrame, config: &RunConfiguration) -> CleaningResult<CleanedFrames> {
        let filter_error = |e: PolarsError| CleaningError::Filter(e.to_string());

        info!("Loaded raw dataframe with shape: {:?}", raw.shape());

        let price_range = config.price_range();
        if price_range.is_inverted() {
            warn!(
                "min_price {} is greater than max_price {}; no rows will be kept",
                price_range.min, price_range.max
            );
        }
        info!(
            "Capping prices between [{}, {}]",
            price_range.min, price_range.max
        );
        let price_filtered = filter_by_price(&raw, price_range).map_err(filter_error)?;
        info!(
            "Price filter kept {} of {} rows",
            price_filtered.height(),
            raw.height()
        );

        let mut cleaned =
            filter_by_geo_bounds(&price_filtered, &self.geo_bounds).map_err(filter_error)?;
        info!(
            "Geographic filter kept {} of {} rows",
            cleaned.height(),
            price_filtered.height()
        );

        let review_dates = normalize_last_review(&mut cleaned).map_err(filter_error)?;
        if review_dates.unparseable > 0 {
            warn!(
                "{} last_review values could not be parsed and were set to null",
                review_dates.unparseable
            );
        }

        Ok(CleanedFrames {
            raw,
            price_filtered,
            cleaned,
            review_dates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::InMemoryArtifactStore;

    fn config(min_price: f64, max_price: f64) -> RunConfiguration {
        RunConfiguration {
            input_artifact: "sample.csv:latest".to_string(),
            output_artifact: "clean_sample.csv".to_string(),
            output_type: "clean_sample".to_string(),
            output_description: "Data with outliers and null values removed".to_string(),
            min_price,
            max_price,
        }
    }

    fn raw_listings() -> DataFrame {
        df! {
            "id" => ["1", "2", "3", "4", "5"],
            "price" => ["10", "50", "999", "200", "-5"],
            "longitude" => ["-73.9", "-70.0", "-73.8", "-73.95", "-74.0"],
            "latitude" => ["40.7", "40.75", "40.8", "40.7", "40.6"],
            "last_review" => ["2019-01-01", "2019-01-02", "2019-01-03", "not-a-date", "2019-01-05"],
        }
        .unwrap()
    }

    #[test]
    fn test_clean_applies_filters_in_order() {
        let store = InMemoryArtifactStore::new();
        let pipeline = CleaningPipeline::new(&store);

        let frames = pipeline.clean(raw_listings(), &config(0.0, 500.0)).unwrap();

        assert_eq!(frames.raw.height(), 5);
        assert_eq!(frames.price_filtered.height(), 3);
        assert_eq!(frames.cleaned.height(), 2);
        assert_eq!(frames.review_dates.unparseable, 1);

        let ids: Vec<&str> = frames
            .cleaned
            .column("id")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_clean_with_inverted_range_is_empty() {
        let store = InMemoryArtifactStore::new();
        let pipeline = CleaningPipeline::new(&store);

        let frames = pipeline.clean(raw_listings(), &config(500.0, 0.0)).unwrap();
        assert_eq!(frames.cleaned.height(), 0);
        assert_eq!(frames.cleaned.width(), 5);
    }

    #[test]
    fn test_run_with_unknown_input_does_not_publish() {
        let store = InMemoryArtifactStore::new();
        let pipeline = CleaningPipeline::new(&store);

        let err = pipeline.run(&config(0.0, 500.0)).unwrap_err();
        assert!(matches!(err, CleaningError::ArtifactNotFound { .. }));
        assert!(store.published().is_empty());
        assert_eq!(store.runs().len(), 1);
    }
}
