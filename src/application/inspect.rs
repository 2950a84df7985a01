//! Event log diagnostics.
//!
//! Declarations and price changes carry game references, but the capture
//! source does not keep them consistent between the two. The overlap count
//! makes that visible; matching never relies on it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::domain::{EventLog, Exchange, GameRef, MessageKind};

const SAMPLE_SIZE: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogStats {
    pub definitions: usize,
    pub messages: usize,
    pub messages_by_kind: BTreeMap<MessageKind, usize>,
    pub messages_by_exchange: BTreeMap<Exchange, usize>,
    pub definition_game_refs: usize,
    pub message_game_refs: usize,
    pub overlapping_game_refs: usize,
    /// Up to ten declaration references absent from every message.
    pub definition_only_sample: Vec<GameRef>,
    /// Up to ten message references absent from every declaration.
    pub message_only_sample: Vec<GameRef>,
}

impl LogStats {
    #[must_use]
    pub fn from_log(log: &EventLog) -> Self {
        let mut messages_by_kind = BTreeMap::new();
        let mut messages_by_exchange = BTreeMap::new();
        let mut message_refs = BTreeSet::new();
        for message in &log.messages {
            *messages_by_kind.entry(message.kind()).or_insert(0) += 1;
            *messages_by_exchange
                .entry(message.header().exchange.clone())
                .or_insert(0) += 1;
            message_refs.insert(message.header().game_ref.clone());
        }

        let definition_refs: BTreeSet<GameRef> = log
            .definitions
            .iter()
            .flat_map(|d| d.game_refs.iter().cloned())
            .collect();

        let stats = Self {
            definitions: log.definitions.len(),
            messages: log.messages.len(),
            messages_by_kind,
            messages_by_exchange,
            definition_game_refs: definition_refs.len(),
            message_game_refs: message_refs.len(),
            overlapping_game_refs: definition_refs.intersection(&message_refs).count(),
            definition_only_sample: definition_refs
                .difference(&message_refs)
                .take(SAMPLE_SIZE)
                .cloned()
                .collect(),
            message_only_sample: message_refs
                .difference(&definition_refs)
                .take(SAMPLE_SIZE)
                .cloned()
                .collect(),
        };

        if stats.has_disjoint_game_refs() {
            warn!(
                definition_refs = stats.definition_game_refs,
                message_refs = stats.message_game_refs,
                "No game references shared between declarations and price changes"
            );
        }
        stats
    }

    /// Both sides carry references and none are shared.
    #[must_use]
    pub fn has_disjoint_game_refs(&self) -> bool {
        self.overlapping_game_refs == 0
            && self.definition_game_refs > 0
            && self.message_game_refs > 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectionMetadata {
    pub parsed_at: DateTime<Utc>,
    pub source_directory: PathBuf,
    pub stats: LogStats,
}

/// Parsed event log plus its statistics, as written by `inspect --output`.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub metadata: InspectionMetadata,
    #[serde(flatten)]
    pub log: EventLog,
}

impl Inspection {
    #[must_use]
    pub fn new(log: EventLog, source_directory: PathBuf, parsed_at: DateTime<Utc>) -> Self {
        Self {
            metadata: InspectionMetadata {
                parsed_at,
                source_directory,
                stats: LogStats::from_log(&log),
            },
            log,
        }
    }

    #[must_use]
    pub const fn stats(&self) -> &LogStats {
        &self.metadata.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::EventLogParser;

    const CAPTURE: &str = "\
1~2~3~NFL~a~b~c~Travis Kelce~Rec Yds~Over~Under~d~e~100~101~f~g~h~i
@messageType=LineChangeTotal@gameid=500@bookieid=807@newover=60.5@newunder=60.5@newoverjuice=-130@newunderjuice=110
@messageType=LineChangeTotal@gameid=501@bookieid=624@newover=60.5@newunder=60.5@newoverjuice=-140@newunderjuice=120
@messageType=LineChangeMoney@gameid=500@bookieid=999@newvisitorjuice=150@newhomejuice=-170";

    #[test]
    fn counts_kinds_and_exchanges() {
        let log = EventLogParser::default().parse_str(CAPTURE, "0.txt");
        let stats = LogStats::from_log(&log);

        assert_eq!(stats.definitions, 1);
        assert_eq!(stats.messages, 3);
        assert_eq!(stats.messages_by_kind[&MessageKind::LineChangeTotal], 2);
        assert_eq!(stats.messages_by_kind[&MessageKind::LineChangeMoney], 1);
        assert_eq!(stats.messages_by_exchange[&Exchange::new("Novig")], 1);
        assert_eq!(stats.message_game_refs, 2);
        assert_eq!(stats.definition_game_refs, 5);
    }

    #[test]
    fn disjoint_references_are_flagged() {
        let log = EventLogParser::default().parse_str(CAPTURE, "0.txt");
        let stats = LogStats::from_log(&log);

        assert_eq!(stats.overlapping_game_refs, 0);
        assert!(stats.has_disjoint_game_refs());
        assert_eq!(stats.message_only_sample.len(), 2);
    }

    #[test]
    fn shared_references_are_counted() {
        let content = CAPTURE.replace("gameid=500", "gameid=100");
        let log = EventLogParser::default().parse_str(&content, "0.txt");
        let stats = LogStats::from_log(&log);

        assert_eq!(stats.overlapping_game_refs, 1);
        assert!(!stats.has_disjoint_game_refs());
    }

    #[test]
    fn empty_log_is_not_flagged() {
        assert!(!LogStats::from_log(&EventLog::default()).has_disjoint_game_refs());
    }
}
