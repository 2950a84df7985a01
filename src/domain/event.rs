//! Records recognized in the odds event log.
//!
//! The log carries two line shapes: tilde-delimited market declarations
//! ([`PropDefinition`]) and `@`-delimited price-change messages
//! ([`OddsMessage`]). Only [`OddsMessage::Total`] feeds prop matching; the
//! other variants are kept for diagnostics.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::id::{BookmakerId, Exchange, GameRef};

/// A declaration that a player market exists. Carries no price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropDefinition {
    pub entity_name: String,
    pub prop_type: String,
    pub game_refs: Vec<GameRef>,
    /// Declarations in the log never carry a line; matching then uses the
    /// catalog's own line.
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub line: Option<Decimal>,
}

impl PropDefinition {
    pub fn new(entity_name: impl Into<String>, prop_type: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            prop_type: prop_type.into(),
            game_refs: Vec::new(),
            line: None,
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: Decimal) -> Self {
        self.line = Some(line);
        self
    }
}

/// Fields shared by every price-change message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageHeader {
    pub game_ref: GameRef,
    pub bookmaker_id: BookmakerId,
    pub exchange: Exchange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<i64>,
    pub source_file: String,
}

/// A `LineChangeTotal` message: an over/under line pair with a price per side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsEvent {
    #[serde(flatten)]
    pub header: MessageHeader,
    #[serde(with = "rust_decimal::serde::float")]
    pub over_line: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub under_line: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub over_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub under_price: Decimal,
}

impl OddsEvent {
    #[must_use]
    pub const fn bookmaker_id(&self) -> BookmakerId {
        self.header.bookmaker_id
    }

    #[must_use]
    pub const fn exchange(&self) -> &Exchange {
        &self.header.exchange
    }
}

/// A `LineChangeSpread` message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadChange {
    #[serde(flatten)]
    pub header: MessageHeader,
    #[serde(with = "rust_decimal::serde::float")]
    pub visitor_spread: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub home_spread: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub visitor_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub home_price: Decimal,
}

/// A `LineChangeMoney` message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyChange {
    #[serde(flatten)]
    pub header: MessageHeader,
    #[serde(with = "rust_decimal::serde::float")]
    pub visitor_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub home_price: Decimal,
}

/// One team's optional over/under quote inside a `LineChangeTeamTotal`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamTotalQuote {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub over_line: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub under_line: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub over_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub under_price: Option<Decimal>,
}

/// A `LineChangeTeamTotal` message. Every quote field is optional.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamTotalChange {
    #[serde(flatten)]
    pub header: MessageHeader,
    pub visitor: TeamTotalQuote,
    pub home: TeamTotalQuote,
}

/// Message type marker found in `messageType=` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MessageKind {
    LineChangeTotal,
    LineChangeSpread,
    LineChangeMoney,
    LineChangeTeamTotal,
}

impl MessageKind {
    /// Parse the marker value; unrecognized types yield `None`.
    #[must_use]
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "LineChangeTotal" => Some(Self::LineChangeTotal),
            "LineChangeSpread" => Some(Self::LineChangeSpread),
            "LineChangeMoney" => Some(Self::LineChangeMoney),
            "LineChangeTeamTotal" => Some(Self::LineChangeTeamTotal),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineChangeTotal => "LineChangeTotal",
            Self::LineChangeSpread => "LineChangeSpread",
            Self::LineChangeMoney => "LineChangeMoney",
            Self::LineChangeTeamTotal => "LineChangeTeamTotal",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized price-change message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "messageType")]
pub enum OddsMessage {
    #[serde(rename = "LineChangeTotal")]
    Total(OddsEvent),
    #[serde(rename = "LineChangeSpread")]
    Spread(SpreadChange),
    #[serde(rename = "LineChangeMoney")]
    Money(MoneyChange),
    #[serde(rename = "LineChangeTeamTotal")]
    TeamTotal(TeamTotalChange),
}

impl OddsMessage {
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Total(_) => MessageKind::LineChangeTotal,
            Self::Spread(_) => MessageKind::LineChangeSpread,
            Self::Money(_) => MessageKind::LineChangeMoney,
            Self::TeamTotal(_) => MessageKind::LineChangeTeamTotal,
        }
    }

    #[must_use]
    pub const fn header(&self) -> &MessageHeader {
        match self {
            Self::Total(m) => &m.header,
            Self::Spread(m) => &m.header,
            Self::Money(m) => &m.header,
            Self::TeamTotal(m) => &m.header,
        }
    }
}

/// Everything recognized in the event log, in file-then-line order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventLog {
    pub definitions: Vec<PropDefinition>,
    pub messages: Vec<OddsMessage>,
}

impl EventLog {
    /// The `LineChangeTotal` events, the only ones used for prop matching.
    pub fn odds_events(&self) -> impl Iterator<Item = &OddsEvent> {
        self.messages.iter().filter_map(|message| match message {
            OddsMessage::Total(event) => Some(event),
            _ => None,
        })
    }
}
