//! Final dataset assembly: sorted matched props plus run metadata.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{BookmakerId, Exchange, ExchangeOrder, MergedProp, OddsEvent};

/// Run-wide facts written next to the props.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    /// Every bookmaker seen in a total-line event, matched or not.
    pub all_available_bookie_ids: Vec<BookmakerId>,
    /// Every exchange seen in a total-line event, in display order.
    pub all_available_exchanges: Vec<Exchange>,
    pub bookie_to_exchange: BTreeMap<BookmakerId, Exchange>,
    pub total_splash_props: usize,
    pub matched_props: usize,
    pub generated_at: DateTime<Utc>,
}

/// The structured output document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub metadata: Metadata,
    pub props: Vec<MergedProp>,
}

impl Dataset {
    /// Catalog entries left out of `props` because nothing correlated.
    #[must_use]
    pub fn unmatched_count(&self) -> usize {
        self.metadata.total_splash_props - self.metadata.matched_props
    }

    /// Share of catalog entries that matched, as a percentage.
    #[must_use]
    pub fn match_rate_pct(&self) -> f64 {
        if self.metadata.total_splash_props == 0 {
            return 0.0;
        }
        self.metadata.matched_props as f64 * 100.0 / self.metadata.total_splash_props as f64
    }
}

#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    order: ExchangeOrder,
}

impl DatasetBuilder {
    pub fn new(order: ExchangeOrder) -> Self {
        Self { order }
    }

    /// Keep matched records, sort by win probability (stable, descending) and
    /// attach metadata derived from every parsed event.
    ///
    /// The timestamp is passed in so identical inputs give identical output.
    pub fn build<'e>(
        &self,
        merged: Vec<MergedProp>,
        events: impl IntoIterator<Item = &'e OddsEvent>,
        generated_at: DateTime<Utc>,
    ) -> Dataset {
        let total = merged.len();
        let mut props: Vec<MergedProp> = merged.into_iter().filter(|p| p.matched).collect();
        props.sort_by(|a, b| b.win_probability_pct.cmp(&a.win_probability_pct));

        let mut bookie_to_exchange = BTreeMap::new();
        let mut exchanges = BTreeSet::new();
        for event in events {
            bookie_to_exchange.insert(event.bookmaker_id(), event.exchange().clone());
            exchanges.insert(event.exchange().clone());
        }

        let mut all_available_exchanges: Vec<Exchange> = exchanges.into_iter().collect();
        self.order.sort(&mut all_available_exchanges);

        let metadata = Metadata {
            all_available_bookie_ids: bookie_to_exchange.keys().copied().collect(),
            all_available_exchanges,
            bookie_to_exchange,
            total_splash_props: total,
            matched_props: props.len(),
            generated_at,
        };

        Dataset { metadata, props }
    }
}
