//! Application configuration loading and validation.
//!
//! Every section is optional; a missing file section falls back to the
//! built-in defaults, which reproduce the capture layout the tool was
//! written against.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::matcher::MatchSettings;
use crate::application::normalize::PropTypeSynonyms;
use crate::domain::{BookmakerId, BookmakerTable, Exchange, ExchangeOrder, FALLBACK_EXCHANGE};
use crate::error::{ConfigError, Result};

mod logging;

pub use logging::LoggingConfig;

/// Input file locations.
#[derive(Debug, Clone, Deserialize)]
pub struct InputsConfig {
    /// Catalog feed CSV. Required at run time.
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,
    /// Directory holding the event log files.
    #[serde(default = "default_event_log_dir")]
    pub event_log_dir: PathBuf,
    /// Event log file names, read in this order. Missing files are skipped.
    #[serde(default = "default_event_log_files")]
    pub event_log_files: Vec<String>,
}

fn default_catalog() -> PathBuf {
    PathBuf::from("data/splash_props_all.csv")
}

fn default_event_log_dir() -> PathBuf {
    PathBuf::from("data/spank_odds_capture")
}

fn default_event_log_files() -> Vec<String> {
    ["initGameMesgs.txt", "0.txt", "1.txt", "2.txt"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl InputsConfig {
    /// Event log paths in read order.
    #[must_use]
    pub fn event_log_paths(&self) -> Vec<PathBuf> {
        self.event_log_files
            .iter()
            .map(|name| self.event_log_dir.join(name))
            .collect()
    }
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            event_log_dir: default_event_log_dir(),
            event_log_files: default_event_log_files(),
        }
    }
}

/// Output file locations.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_json_file")]
    pub json_file: String,
    #[serde(default = "default_csv_file")]
    pub csv_file: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_json_file() -> String {
    "merged_props.json".into()
}

fn default_csv_file() -> String {
    "merged_props.csv".into()
}

impl OutputConfig {
    #[must_use]
    pub fn json_path(&self) -> PathBuf {
        self.dir.join(&self.json_file)
    }

    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.dir.join(&self.csv_file)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            json_file: default_json_file(),
            csv_file: default_csv_file(),
        }
    }
}

/// Line tolerances used by the two matching passes.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Declaration-to-catalog tolerance (strict `<`).
    #[serde(default = "default_definition_tolerance")]
    pub definition_tolerance: Decimal,
    /// Event-line-to-catalog tolerance per side (strict `<`).
    #[serde(default = "default_odds_tolerance")]
    pub odds_tolerance: Decimal,
}

fn default_definition_tolerance() -> Decimal {
    Decimal::ONE
}

fn default_odds_tolerance() -> Decimal {
    Decimal::new(5, 1) // 0.5
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            definition_tolerance: default_definition_tolerance(),
            odds_tolerance: default_odds_tolerance(),
        }
    }
}

/// Exchange naming and ordering.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangesConfig {
    /// Exchanges listed first, in this order; the rest sort alphabetically.
    #[serde(default = "default_priority")]
    pub priority: Vec<String>,
    /// Exchange assigned to bookmakers missing from the table.
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_priority() -> Vec<String> {
    vec!["ProphetX".into(), "Novig".into()]
}

fn default_fallback() -> String {
    FALLBACK_EXCHANGE.into()
}

impl Default for ExchangesConfig {
    fn default() -> Self {
        Self {
            priority: default_priority(),
            fallback: default_fallback(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inputs: InputsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub exchanges: ExchangesConfig,
    /// Bookmaker id -> exchange name. Replaces the built-in table when set.
    #[serde(default)]
    pub bookmakers: Option<BTreeMap<String, String>>,
    /// Prop-type label -> canonical label. Replaces the built-in table when set.
    #[serde(default)]
    pub prop_types: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.matching.definition_tolerance <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "definition_tolerance",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.matching.odds_tolerance <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "odds_tolerance",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.exchanges.fallback.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "fallback" }.into());
        }
        if self.inputs.event_log_files.is_empty() {
            return Err(ConfigError::MissingField {
                field: "event_log_files",
            }
            .into());
        }

        self.bookmaker_table()?;

        let conflicts = self.prop_type_synonyms().conflicts();
        if !conflicts.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "prop_types",
                reason: format!(
                    "canonical labels are remapped again for: {}",
                    conflicts.join(", ")
                ),
            }
            .into());
        }

        Ok(())
    }

    /// Build the bookmaker table, parsing the configured ids.
    pub fn bookmaker_table(&self) -> Result<BookmakerTable> {
        let fallback = Exchange::new(self.exchanges.fallback.trim());
        let Some(raw) = &self.bookmakers else {
            let defaults = BookmakerTable::default();
            return Ok(if defaults.fallback() == &fallback {
                defaults
            } else {
                BookmakerTable::new(default_entries(&defaults), fallback)
            });
        };

        let mut entries = BTreeMap::new();
        for (id, exchange) in raw {
            let parsed: u32 = id.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "bookmakers",
                reason: format!("bookmaker id '{id}' is not an unsigned integer"),
            })?;
            entries.insert(BookmakerId::new(parsed), Exchange::new(exchange.trim()));
        }
        Ok(BookmakerTable::new(entries, fallback))
    }

    #[must_use]
    pub fn prop_type_synonyms(&self) -> PropTypeSynonyms {
        match &self.prop_types {
            Some(table) => PropTypeSynonyms::new(table.iter().map(|(k, v)| (k, v.clone()))),
            None => PropTypeSynonyms::default(),
        }
    }

    #[must_use]
    pub fn exchange_order(&self) -> ExchangeOrder {
        ExchangeOrder::new(
            self.exchanges
                .priority
                .iter()
                .map(|name| Exchange::new(name.trim()))
                .collect(),
        )
    }

    #[must_use]
    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            definition_tolerance: self.matching.definition_tolerance,
            odds_tolerance: self.matching.odds_tolerance,
        }
    }
}

fn default_entries(table: &BookmakerTable) -> BTreeMap<BookmakerId, Exchange> {
    table.entries().map(|(id, exchange)| (id, exchange.clone())).collect()
}
