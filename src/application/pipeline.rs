//! Linear batch run: read both feeds, match, aggregate, write.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use super::aggregate::Aggregator;
use super::dataset::{Dataset, DatasetBuilder};
use super::matcher::{MatchSettings, Matcher};
use super::normalize::Normalizer;
use crate::adapter::{CatalogParser, EventLogParser, ReportWriter};
use crate::config::Config;
use crate::error::Result;

/// Counts and paths from one completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub dataset: Dataset,
    pub definitions: usize,
    pub odds_events: usize,
    /// Catalog entries confirmed by a declaration.
    pub confirmed: usize,
    /// Event-to-line correlations before aggregation.
    pub matched_odds: usize,
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
}

/// The merge pipeline with every stage configured up front.
#[derive(Debug, Clone)]
pub struct Pipeline {
    catalog_path: PathBuf,
    event_log_paths: Vec<PathBuf>,
    event_log: EventLogParser,
    normalizer: Normalizer,
    settings: MatchSettings,
    aggregator: Aggregator,
    builder: DatasetBuilder,
    writer: ReportWriter,
}

impl Pipeline {
    /// Build the pipeline from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let order = config.exchange_order();
        Ok(Self {
            catalog_path: config.inputs.catalog.clone(),
            event_log_paths: config.inputs.event_log_paths(),
            event_log: EventLogParser::new(config.bookmaker_table()?),
            normalizer: Normalizer::new(config.prop_type_synonyms()),
            settings: config.match_settings(),
            aggregator: Aggregator::new(order.clone()),
            builder: DatasetBuilder::new(order),
            writer: ReportWriter::new(config.output.json_path(), config.output.csv_path()),
        })
    }

    #[must_use]
    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Run with the current time as the generation timestamp.
    pub fn run(&self) -> Result<RunReport> {
        self.run_at(Utc::now())
    }

    /// Run with a fixed generation timestamp.
    ///
    /// Every input is read before anything is written, so a missing catalog
    /// leaves existing output untouched.
    pub fn run_at(&self, generated_at: DateTime<Utc>) -> Result<RunReport> {
        let catalog = CatalogParser::new().parse_file(&self.catalog_path)?;
        let log = self.event_log.parse_files(&self.event_log_paths)?;

        let matcher = Matcher::new(&self.normalizer, self.settings);
        let outcome = matcher.run(&catalog, &log.definitions, log.odds_events());
        info!(
            catalog = catalog.len(),
            confirmed = outcome.confirmed.len(),
            matched_odds = outcome.matches.len(),
            "Matching complete"
        );

        let merged = self.aggregator.aggregate_all(&catalog, &outcome.matches);
        let dataset = self.builder.build(merged, log.odds_events(), generated_at);
        info!(
            total = dataset.metadata.total_splash_props,
            matched = dataset.metadata.matched_props,
            bookmakers = dataset.metadata.all_available_bookie_ids.len(),
            "Dataset assembled"
        );

        self.writer.write(&dataset)?;

        Ok(RunReport {
            definitions: log.definitions.len(),
            odds_events: log.odds_events().count(),
            confirmed: outcome.confirmed.len(),
            matched_odds: outcome.matches.len(),
            json_path: self.writer.json_path().to_path_buf(),
            csv_path: self.writer.csv_path().to_path_buf(),
            dataset,
        })
    }
}
