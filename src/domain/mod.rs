//! Feed-agnostic domain types and betting math.

pub mod error;
pub mod odds;

mod catalog;
mod event;
mod exchange;
mod id;
mod merged;
mod side;

pub use catalog::CatalogEntry;
pub use event::{
    EventLog, MessageHeader, MessageKind, MoneyChange, OddsEvent, OddsMessage, PropDefinition,
    SpreadChange, TeamTotalChange, TeamTotalQuote,
};
pub use exchange::{BookmakerTable, ExchangeOrder, FALLBACK_EXCHANGE};
pub use id::{BookmakerId, CatalogId, Exchange, GameRef};
pub use merged::{MatchedOdds, MergedProp};
pub use odds::AmericanOdds;
pub use side::Side;
