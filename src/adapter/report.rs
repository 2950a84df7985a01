//! Output writers for the merged dataset.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use tracing::info;

use crate::application::dataset::Dataset;
use crate::error::Result;

const CSV_HEADER: [&str; 6] = [
    "Player",
    "Prop Type",
    "Splash Line",
    "Average Odds",
    "Win %",
    "Exchanges",
];

/// Write a document as pretty-printed JSON followed by a newline.
pub fn write_json<T: Serialize, W: Write>(document: &T, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write a JSON document to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(document: &T, path: &Path) -> Result<()> {
    create_parent(path)?;
    write_json(document, BufWriter::new(File::create(path)?))
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write one CSV row per prop, in dataset order.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);
    csv.write_record(CSV_HEADER)?;

    for prop in &dataset.props {
        let exchanges: Vec<&str> = prop.exchanges.iter().map(|e| e.as_str()).collect();
        csv.write_record([
            prop.entity_name.clone(),
            prop.prop_type.clone(),
            prop.line.normalize().to_string(),
            prop.average_price.to_string(),
            format!("{:.2}", prop.win_probability_pct),
            exchanges.join(";"),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Writes both output forms into fixed paths.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    json_path: PathBuf,
    csv_path: PathBuf,
}

impl ReportWriter {
    pub fn new(json_path: impl Into<PathBuf>, csv_path: impl Into<PathBuf>) -> Self {
        Self {
            json_path: json_path.into(),
            csv_path: csv_path.into(),
        }
    }

    #[must_use]
    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    #[must_use]
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Create parent directories and write both files.
    ///
    /// Both files are opened before either is written; a CSV path that
    /// cannot be created leaves the JSON output untouched.
    pub fn write(&self, dataset: &Dataset) -> Result<()> {
        create_parent(&self.json_path)?;
        create_parent(&self.csv_path)?;
        let csv_file = File::create(&self.csv_path)?;
        let json_file = File::create(&self.json_path)?;

        write_json(dataset, BufWriter::new(json_file))?;
        write_csv(dataset, BufWriter::new(csv_file))?;

        info!(
            json = %self.json_path.display(),
            csv = %self.csv_path.display(),
            props = dataset.props.len(),
            "Merged dataset written"
        );
        Ok(())
    }
}
