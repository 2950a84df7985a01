//! Correlated prices and the merged per-catalog output record.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::catalog::CatalogEntry;
use super::id::{BookmakerId, CatalogId, Exchange};
use super::odds::AmericanOdds;
use super::side::Side;

/// One price-change event resolved to a side of exactly one catalog line.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedOdds {
    /// Position of the catalog entry in catalog order.
    pub catalog_index: usize,
    pub entity_name: String,
    pub prop_type: String,
    pub line: Decimal,
    pub side: Side,
    pub price: Decimal,
    pub bookmaker_id: BookmakerId,
    pub exchange: Exchange,
}

/// The merged record for one catalog entry.
///
/// Unmatched entries keep the same shape with zeroed numbers and empty
/// collections, so consumers never see missing fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedProp {
    pub id: CatalogId,
    pub entity_name: String,
    #[serde(rename = "type_display")]
    pub prop_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub line: Decimal,
    #[serde(rename = "average_odds")]
    pub average_price: AmericanOdds,
    #[serde(rename = "win_probability", with = "rust_decimal::serde::float")]
    pub win_probability_pct: Decimal,
    #[serde(rename = "odds_by_bookie")]
    pub prices_by_bookmaker: BTreeMap<BookmakerId, AmericanOdds>,
    #[serde(rename = "side_by_bookie")]
    pub side_by_bookmaker: BTreeMap<BookmakerId, Side>,
    #[serde(rename = "odds_by_exchange")]
    pub prices_by_exchange: BTreeMap<Exchange, AmericanOdds>,
    pub primary_side: Option<Side>,
    pub exchanges: Vec<Exchange>,
    #[serde(rename = "bookieIds")]
    pub bookmaker_ids: Vec<BookmakerId>,
    pub matched: bool,
}

impl MergedProp {
    /// The record emitted for a catalog entry with no correlated prices.
    #[must_use]
    pub fn unmatched(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            entity_name: entry.entity_name.clone(),
            prop_type: entry.prop_type.clone(),
            line: entry.line,
            average_price: 0,
            win_probability_pct: Decimal::ZERO,
            prices_by_bookmaker: BTreeMap::new(),
            side_by_bookmaker: BTreeMap::new(),
            prices_by_exchange: BTreeMap::new(),
            primary_side: None,
            exchanges: Vec::new(),
            bookmaker_ids: Vec::new(),
            matched: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn unmatched_record_keeps_a_uniform_shape() {
        let entry = CatalogEntry::new("prop_1", "Lewis Bond", "Rec Yds", dec!(74.5));
        let merged = MergedProp::unmatched(&entry);
        let json = serde_json::to_value(&merged).unwrap();

        assert_eq!(json["matched"], false);
        assert_eq!(json["average_odds"], 0);
        assert_eq!(json["win_probability"], 0.0);
        assert_eq!(json["odds_by_bookie"], serde_json::json!({}));
        assert_eq!(json["bookieIds"], serde_json::json!([]));
        assert!(json["primary_side"].is_null());
        assert_eq!(json["line"], 74.5);
    }
}
