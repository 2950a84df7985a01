//! Catalog feed entries.

use rust_decimal::Decimal;

use super::id::CatalogId;

/// One proposition from the canonical catalog feed.
///
/// Every entry yields exactly one merged record, matched or not.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: CatalogId,
    pub entity_name: String,
    pub league: String,
    pub team: String,
    pub prop_type: String,
    pub line: Decimal,
}

impl CatalogEntry {
    /// Build an entry without the league/team columns, which play no part in matching.
    pub fn new(
        id: impl Into<CatalogId>,
        entity_name: impl Into<String>,
        prop_type: impl Into<String>,
        line: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            entity_name: entity_name.into(),
            league: String::new(),
            team: String::new(),
            prop_type: prop_type.into(),
            line,
        }
    }
}
