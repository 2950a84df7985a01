//! Catalog feed reader.
//!
//! The feed is a CSV file with a header row and the columns
//! `id, entity name, league, team, prop type, line`. Extra trailing columns
//! are ignored.

use std::collections::HashSet;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::{CatalogEntry, CatalogId};
use crate::error::{Error, Result};

const MIN_COLUMNS: usize = 6;

#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogParser;

impl CatalogParser {
    pub fn new() -> Self {
        Self
    }

    /// Read the catalog feed from disk.
    ///
    /// # Errors
    ///
    /// The catalog is a required input: any failure to read the file is
    /// [`Error::RequiredInput`]. Malformed rows are skipped.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<CatalogEntry>> {
        let bytes = std::fs::read(path).map_err(|source| Error::RequiredInput {
            resource: "catalog feed",
            path: path.to_path_buf(),
            source,
        })?;
        let entries = self.parse_bytes(&bytes);
        info!(path = %path.display(), entries = entries.len(), "Catalog loaded");
        Ok(entries)
    }

    /// Parse catalog CSV content, header row first.
    #[must_use]
    pub fn parse_bytes(&self, content: &[u8]) -> Vec<CatalogEntry> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content);

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let mut skipped = 0usize;

        for (row, record) in reader.records().enumerate() {
            let Some(entry) = record.ok().and_then(|r| parse_record(&r)) else {
                skipped += 1;
                continue;
            };
            if !seen.insert(entry.id.clone()) {
                warn!(id = %entry.id, row = row + 1, "Duplicate catalog id, keeping the first");
                skipped += 1;
                continue;
            }
            entries.push(entry);
        }

        if skipped > 0 {
            debug!(skipped, "Skipped malformed catalog rows");
        }
        entries
    }
}

fn parse_record(record: &StringRecord) -> Option<CatalogEntry> {
    if record.len() < MIN_COLUMNS {
        return None;
    }
    let line: Decimal = record.get(5)?.parse().ok()?;

    Some(CatalogEntry {
        id: CatalogId::new(record.get(0)?),
        entity_name: record.get(1)?.to_string(),
        league: record.get(2)?.to_string(),
        team: record.get(3)?.to_string(),
        prop_type: record.get(4)?.to_string(),
        line,
    })
}
