//! Basic cleaning step binary
//!
//! Downloads the raw listings artifact, drops price and location outliers,
//! normalizes `last_review` and publishes the cleaned CSV as a new artifact.
//!
//! # Usage
//!
//! ```bash
//! basic_cleaning \
//!   --input_artifact sample.csv:latest \
//!   --output_artifact clean_sample.csv \
//!   --output_type clean_sample \
//!   --output_description "Data with outliers and null values removed" \
//!   --min_price 10 \
//!   --max_price 350
//! ```
//!
//! # Environment Variables
//!
//! - `ARTIFACT_ROOT`: Artifact store directory (default: artifacts)
//! - `ARTIFACT_BACKEND`: `filesystem` or `memory` (default: filesystem)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use basic_cleaning::artifacts::ArtifactStoreFactory;
use basic_cleaning::{
    CleaningError, CleaningPipeline, CleaningReport, CleaningSettings, RunConfiguration, Stage,
};

#[derive(Parser, Debug)]
#[command(name = "basic_cleaning")]
#[command(about = "A very basic data cleaning step")]
#[command(version)]
struct Cli {
    /// Name of the input raw file in the artifact store
    #[arg(long = "input_artifact")]
    input_artifact: String,

    /// Name of the output cleaned file
    #[arg(long = "output_artifact")]
    output_artifact: String,

    /// Output type
    #[arg(long = "output_type")]
    output_type: String,

    /// Output artifact description
    #[arg(long = "output_description")]
    output_description: String,

    /// Min price of houses/rentals
    #[arg(long = "min_price", allow_negative_numbers = true)]
    min_price: f64,

    /// Max price of houses/rentals
    #[arg(long = "max_price", allow_negative_numbers = true)]
    max_price: f64,

    /// Settings file (defaults to ./basic_cleaning.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn run_configuration(&self) -> RunConfiguration {
        RunConfiguration {
            input_artifact: self.input_artifact.clone(),
            output_artifact: self.output_artifact.clone(),
            output_type: self.output_type.clone(),
            output_description: self.output_description.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<CleaningReport> {
    let settings = CleaningSettings::load(cli.config.as_deref())?;
    let store = ArtifactStoreFactory::create(&settings.artifacts)
        .map_err(|e| CleaningError::Configuration(e.to_string()))
        .context("Failed to create artifact store")?;

    let pipeline = CleaningPipeline::with_settings(&*store, &settings);
    let report = pipeline.run(&cli.run_configuration())?;
    Ok(report)
}

fn failed_stage(err: &anyhow::Error) -> Stage {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CleaningError>())
        .map(CleaningError::stage)
        .unwrap_or(Stage::Config)
}

fn main() -> ExitCode {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => {
            println!();
            println!("✓ Cleaning completed successfully!");
            println!("  Input: {}", report.input_path.display());
            println!(
                "  Rows: {} loaded, {} after price filter, {} after geographic filter",
                report.rows_loaded, report.rows_after_price, report.rows_after_geo
            );
            println!(
                "  last_review: {} parsed, {} missing, {} unparseable",
                report.review_dates.parsed,
                report.review_dates.missing,
                report.review_dates.unparseable
            );
            println!("  Output file: {}", report.output_path.display());
            println!("  Artifact: {}", report.artifact);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Cleaning failed at {} stage: {:#}", failed_stage(&e), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_accepts_snake_case_flags() {
        let cli = Cli::try_parse_from([
            "basic_cleaning",
            "--input_artifact",
            "sample.csv:latest",
            "--output_artifact",
            "clean_sample.csv",
            "--output_type",
            "clean_sample",
            "--output_description",
            "Data with outliers and null values removed",
            "--min_price",
            "-5",
            "--max_price",
            "350",
        ])
        .unwrap();

        let config = cli.run_configuration();
        assert_eq!(config.input_artifact, "sample.csv:latest");
        assert_eq!(config.min_price, -5.0);
        assert_eq!(config.max_price, 350.0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_requires_every_run_flag() {
        let result = Cli::try_parse_from([
            "basic_cleaning",
            "--input_artifact",
            "sample.csv:latest",
            "--min_price",
            "10",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_failed_stage_from_chain() {
        let err = anyhow::Error::new(CleaningError::MissingColumn {
            column: "price".to_string(),
        })
        .context("while cleaning");
        assert_eq!(failed_stage(&err), Stage::Parse);
        assert_eq!(failed_stage(&anyhow::anyhow!("boom")), Stage::Config);
    }
}
