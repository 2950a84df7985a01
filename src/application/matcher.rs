//! Correlates the event log against the catalog.
//!
//! The feeds share no identifier, so matching is an explicit join producing
//! zero or more correlations per input record:
//!
//! 1. declarations confirm catalog entries (normalized name and type equal,
//!    line within `definition_tolerance`)
//! 2. total-line events attach a price to one side of each confirmed entry
//!    whose line is within `odds_tolerance`

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use super::normalize::{Normalizer, PropKey};
use crate::domain::{CatalogEntry, MatchedOdds, OddsEvent, PropDefinition, Side};

/// Line tolerances for both passes. Comparisons are strict (`<`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSettings {
    pub definition_tolerance: Decimal,
    pub odds_tolerance: Decimal,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            definition_tolerance: Decimal::ONE,
            odds_tolerance: Decimal::new(5, 1),
        }
    }
}

/// Result of both passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    /// Catalog indices confirmed by at least one declaration, ascending.
    pub confirmed: Vec<usize>,
    pub matches: Vec<MatchedOdds>,
}

pub struct Matcher<'a> {
    normalizer: &'a Normalizer,
    settings: MatchSettings,
}

impl<'a> Matcher<'a> {
    pub fn new(normalizer: &'a Normalizer, settings: MatchSettings) -> Self {
        Self {
            normalizer,
            settings,
        }
    }

    /// Run both passes.
    pub fn run<'e>(
        &self,
        catalog: &[CatalogEntry],
        definitions: &[PropDefinition],
        events: impl IntoIterator<Item = &'e OddsEvent>,
    ) -> MatchOutcome {
        let confirmed = self.confirm_definitions(catalog, definitions);
        let matches = self.correlate_odds(catalog, &confirmed, events);
        MatchOutcome { confirmed, matches }
    }

    /// Pass 1: catalog entries whose existence a declaration confirms.
    ///
    /// A declaration matching several entries confirms all of them. An entry
    /// confirmed by several declarations appears once.
    pub fn confirm_definitions(
        &self,
        catalog: &[CatalogEntry],
        definitions: &[PropDefinition],
    ) -> Vec<usize> {
        let index = self.index_catalog(catalog);
        let mut confirmed = vec![false; catalog.len()];

        for definition in definitions {
            let key = self
                .normalizer
                .key(&definition.entity_name, &definition.prop_type);
            let Some(candidates) = index.get(&key) else {
                continue;
            };
            for &i in candidates {
                let entry = &catalog[i];
                let line = definition.line.unwrap_or(entry.line);
                if within(line, entry.line, self.settings.definition_tolerance) {
                    confirmed[i] = true;
                }
            }
        }

        let confirmed: Vec<usize> = confirmed
            .iter()
            .enumerate()
            .filter_map(|(i, hit)| hit.then_some(i))
            .collect();
        debug!(
            definitions = definitions.len(),
            confirmed = confirmed.len(),
            "Declarations matched to catalog"
        );
        confirmed
    }

    /// Pass 2: attach each event to every confirmed entry it is close to.
    pub fn correlate_odds<'e>(
        &self,
        catalog: &[CatalogEntry],
        confirmed: &[usize],
        events: impl IntoIterator<Item = &'e OddsEvent>,
    ) -> Vec<MatchedOdds> {
        let events: Vec<&OddsEvent> = events.into_iter().collect();
        let mut matches = Vec::new();

        for &i in confirmed {
            let entry = &catalog[i];
            for event in &events {
                let Some((side, price)) =
                    resolve_side(event, entry.line, self.settings.odds_tolerance)
                else {
                    continue;
                };
                matches.push(MatchedOdds {
                    catalog_index: i,
                    entity_name: entry.entity_name.clone(),
                    prop_type: entry.prop_type.clone(),
                    line: entry.line,
                    side,
                    price,
                    bookmaker_id: event.bookmaker_id(),
                    exchange: event.exchange().clone(),
                });
            }
        }

        debug!(
            events = events.len(),
            matches = matches.len(),
            "Events correlated to catalog lines"
        );
        matches
    }

    fn index_catalog(&self, catalog: &[CatalogEntry]) -> HashMap<PropKey, Vec<usize>> {
        let mut index: HashMap<PropKey, Vec<usize>> = HashMap::new();
        for (i, entry) in catalog.iter().enumerate() {
            index
                .entry(self.normalizer.key(&entry.entity_name, &entry.prop_type))
                .or_default()
                .push(i);
        }
        index
    }
}

/// Distance between two lines; `None` when it does not fit a `Decimal`.
fn distance(a: Decimal, b: Decimal) -> Option<Decimal> {
    a.checked_sub(b).map(|d| d.abs())
}

fn within(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    distance(a, b).is_some_and(|d| d < tolerance)
}

/// Decide which side of `line` an event prices, if any.
///
/// Each side is tested independently. When both are in range the closer line
/// wins; an exact tie goes to over.
#[must_use]
pub fn resolve_side(
    event: &OddsEvent,
    line: Decimal,
    tolerance: Decimal,
) -> Option<(Side, Decimal)> {
    let over = distance(event.over_line, line).filter(|d| *d < tolerance);
    let under = distance(event.under_line, line).filter(|d| *d < tolerance);

    match (over, under) {
        (Some(o), Some(u)) if u < o => Some((Side::Under, event.under_price)),
        (Some(_), _) => Some((Side::Over, event.over_price)),
        (None, Some(_)) => Some((Side::Under, event.under_price)),
        (None, None) => None,
    }
}
