//! Per-entry price aggregation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::domain::odds::{round_average, win_probability_pct};
use crate::domain::{
    BookmakerId, CatalogEntry, Exchange, ExchangeOrder, MatchedOdds, MergedProp, Side,
};

/// Folds the correlated prices of one catalog entry into a [`MergedProp`].
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    order: ExchangeOrder,
}

#[derive(Default)]
struct BookmakerTally {
    over: Vec<Decimal>,
    under: Vec<Decimal>,
}

impl BookmakerTally {
    fn push(&mut self, side: Side, price: Decimal) {
        match side {
            Side::Over => self.over.push(price),
            Side::Under => self.under.push(price),
        }
    }

    /// Majority side over every observation, and the prices on that side.
    fn resolve(&self) -> (Side, &[Decimal]) {
        let side = Side::by_majority(self.over.len(), self.under.len());
        match side {
            Side::Over => (side, self.over.as_slice()),
            Side::Under => (side, self.under.as_slice()),
        }
    }
}

impl Aggregator {
    pub fn new(order: ExchangeOrder) -> Self {
        Self { order }
    }

    /// Aggregate every catalog entry, in catalog order.
    ///
    /// `matches` may arrive in any order; each is routed by its catalog index.
    pub fn aggregate_all(&self, catalog: &[CatalogEntry], matches: &[MatchedOdds]) -> Vec<MergedProp> {
        let mut grouped: Vec<Vec<&MatchedOdds>> = vec![Vec::new(); catalog.len()];
        for matched in matches {
            if let Some(group) = grouped.get_mut(matched.catalog_index) {
                group.push(matched);
            }
        }

        catalog
            .iter()
            .zip(grouped)
            .map(|(entry, group)| self.aggregate(entry, &group))
            .collect()
    }

    /// Aggregate the prices correlated to one entry.
    #[must_use]
    pub fn aggregate(&self, entry: &CatalogEntry, matches: &[&MatchedOdds]) -> MergedProp {
        if matches.is_empty() {
            return MergedProp::unmatched(entry);
        }

        let mut by_bookmaker: BTreeMap<BookmakerId, BookmakerTally> = BTreeMap::new();
        let mut by_exchange: BTreeMap<Exchange, Vec<Decimal>> = BTreeMap::new();
        let mut all_prices = Vec::with_capacity(matches.len());
        let (mut over, mut under) = (0usize, 0usize);

        for matched in matches {
            by_bookmaker
                .entry(matched.bookmaker_id)
                .or_default()
                .push(matched.side, matched.price);
            by_exchange
                .entry(matched.exchange.clone())
                .or_default()
                .push(matched.price);
            all_prices.push(matched.price);
            match matched.side {
                Side::Over => over += 1,
                Side::Under => under += 1,
            }
        }

        // prices too large to average leave nothing usable to report
        let Some(average_price) = round_average(&all_prices) else {
            return MergedProp::unmatched(entry);
        };

        let mut prices_by_bookmaker = BTreeMap::new();
        let mut side_by_bookmaker = BTreeMap::new();
        for (id, tally) in &by_bookmaker {
            let (side, prices) = tally.resolve();
            if let Some(price) = round_average(prices) {
                prices_by_bookmaker.insert(*id, price);
                side_by_bookmaker.insert(*id, side);
            }
        }

        let prices_by_exchange: BTreeMap<Exchange, i64> = by_exchange
            .iter()
            .filter_map(|(exchange, prices)| {
                round_average(prices).map(|price| (exchange.clone(), price))
            })
            .collect();

        let mut exchanges: Vec<Exchange> = prices_by_exchange.keys().cloned().collect();
        self.order.sort(&mut exchanges);

        MergedProp {
            id: entry.id.clone(),
            entity_name: entry.entity_name.clone(),
            prop_type: entry.prop_type.clone(),
            line: entry.line,
            average_price,
            win_probability_pct: win_probability_pct(average_price),
            bookmaker_ids: prices_by_bookmaker.keys().copied().collect(),
            prices_by_bookmaker,
            side_by_bookmaker,
            prices_by_exchange,
            primary_side: Some(Side::by_majority(over, under)),
            exchanges,
            matched: true,
        }
    }
}
