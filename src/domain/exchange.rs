//! Bookmaker-to-exchange resolution and exchange display ordering.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::id::{BookmakerId, Exchange};

/// Static mapping from bookmaker id to the exchange it executes on.
///
/// Unknown ids resolve to the fallback exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmakerTable {
    entries: BTreeMap<BookmakerId, Exchange>,
    fallback: Exchange,
}

/// Default fallback exchange for unmapped bookmakers.
pub const FALLBACK_EXCHANGE: &str = "Other";

const DEFAULT_TABLE: &[(u32, &str)] = &[
    (807, "ProphetX"),
    (433, "ProphetX"),
    (624, "Novig"),
    (625, "Novig"),
    (832, "Other"),
    (937, "Other"),
    (999, "Other"),
    (379, "Other"),
    (816, "Other"),
    (815, "Other"),
    (818, "Other"),
    (819, "Other"),
    (817, "Other"),
    (604, "Other"),
    (605, "Other"),
    (721, "Other"),
    (973, "Other"),
    (805, "Other"),
    (460, "Other"),
    (811, "Other"),
    (802, "Other"),
    (457, "Other"),
    (846, "Other"),
    (898, "Other"),
    (444, "Other"),
];

impl BookmakerTable {
    pub fn new(entries: BTreeMap<BookmakerId, Exchange>, fallback: Exchange) -> Self {
        Self { entries, fallback }
    }

    /// Resolve a bookmaker id to its exchange.
    #[must_use]
    pub fn resolve(&self, id: BookmakerId) -> Exchange {
        self.entries
            .get(&id)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    #[must_use]
    pub const fn fallback(&self) -> &Exchange {
        &self.fallback
    }

    /// Explicitly mapped bookmakers, ascending by id.
    pub fn entries(&self) -> impl Iterator<Item = (BookmakerId, &Exchange)> {
        self.entries.iter().map(|(id, exchange)| (*id, exchange))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BookmakerTable {
    fn default() -> Self {
        let entries = DEFAULT_TABLE
            .iter()
            .map(|(id, name)| (BookmakerId::new(*id), Exchange::from(*name)))
            .collect();
        Self::new(entries, Exchange::from(FALLBACK_EXCHANGE))
    }
}

/// Display order for exchanges: named venues first in their configured
/// order, everything else alphabetically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOrder {
    priority: Vec<Exchange>,
}

impl ExchangeOrder {
    pub fn new(priority: Vec<Exchange>) -> Self {
        Self { priority }
    }

    /// Compare two exchanges under this ordering.
    #[must_use]
    pub fn compare(&self, a: &Exchange, b: &Exchange) -> Ordering {
        let rank = |e: &Exchange| self.priority.iter().position(|p| p == e);
        match (rank(a), rank(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }

    /// Sort exchanges in place.
    pub fn sort(&self, exchanges: &mut [Exchange]) {
        exchanges.sort_by(|a, b| self.compare(a, b));
    }
}

impl Default for ExchangeOrder {
    fn default() -> Self {
        Self::new(vec![Exchange::from("ProphetX"), Exchange::from("Novig")])
    }
}
