//! Event log reader.
//!
//! A capture is a set of text files holding two line shapes:
//!
//! - tilde-delimited declarations, `...~<player>~<prop type>~Over~Under~...`
//! - free-form price-change lines carrying `key=value` tokens, e.g.
//!   `1700000000123 @messageType=LineChangeTotal@gameid=9912@newover=60.5@...`
//!
//! Each shape has a recognizer that returns `None` for anything it cannot
//! fully read. Malformed lines are common in captures and are skipped without
//! an error.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::{
    BookmakerId, BookmakerTable, EventLog, GameRef, MessageHeader, MessageKind, MoneyChange,
    OddsEvent, OddsMessage, PropDefinition, SpreadChange, TeamTotalChange, TeamTotalQuote,
};
use crate::error::Result;

const FIELD_DELIMITER: char = '~';
const MIN_DEFINITION_FIELDS: usize = 11;
const OVER_MARKER: &str = "Over";
const UNDER_MARKER: &str = "Under";

static RE_MESSAGE_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"messageType=([A-Za-z]+)").unwrap());
static RE_NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z][A-Za-z0-9_]*)=(-?\d+(?:\.\d*)?)").unwrap());
static RE_LEADING_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)").unwrap());

/// One recognized line.
#[derive(Debug, Clone, PartialEq)]
pub enum LogRecord {
    Definition(PropDefinition),
    Message(OddsMessage),
}

/// Reads event log files into an [`EventLog`].
#[derive(Debug, Clone, Default)]
pub struct EventLogParser {
    bookmakers: BookmakerTable,
}

impl EventLogParser {
    pub fn new(bookmakers: BookmakerTable) -> Self {
        Self { bookmakers }
    }

    /// Read every file in order. Missing files contribute nothing.
    ///
    /// # Errors
    ///
    /// Fails only when a file exists but cannot be read.
    pub fn parse_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<EventLog> {
        let mut log = EventLog::default();

        for path in paths {
            let path = path.as_ref();
            let bytes = match std::fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!(path = %path.display(), "Event log file not found, skipping");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let source_file = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let before = (log.definitions.len(), log.messages.len());
            self.parse_into(&String::from_utf8_lossy(&bytes), &source_file, &mut log);

            debug!(
                file = %source_file,
                definitions = log.definitions.len() - before.0,
                messages = log.messages.len() - before.1,
                "Parsed event log file"
            );
        }

        info!(
            definitions = log.definitions.len(),
            messages = log.messages.len(),
            total_events = log.odds_events().count(),
            "Event log parsed"
        );
        Ok(log)
    }

    /// Parse one file's content, appending to `log` in line order.
    pub fn parse_into(&self, content: &str, source_file: &str, log: &mut EventLog) {
        for line in content.lines() {
            match self.parse_line(line, source_file) {
                Some(LogRecord::Definition(definition)) => log.definitions.push(definition),
                Some(LogRecord::Message(message)) => log.messages.push(message),
                None => {}
            }
        }
    }

    /// Parse a single content string into a fresh log.
    #[must_use]
    pub fn parse_str(&self, content: &str, source_file: &str) -> EventLog {
        let mut log = EventLog::default();
        self.parse_into(content, source_file, &mut log);
        log
    }

    /// Recognize one line. Declarations are tried first.
    #[must_use]
    pub fn parse_line(&self, line: &str, source_file: &str) -> Option<LogRecord> {
        if let Some(definition) = recognize_definition(line) {
            return Some(LogRecord::Definition(definition));
        }
        self.recognize_message(line, source_file)
            .map(LogRecord::Message)
    }

    fn recognize_message(&self, line: &str, source_file: &str) -> Option<OddsMessage> {
        let marker = RE_MESSAGE_TYPE.captures(line)?.get(1)?.as_str();
        let kind = MessageKind::from_marker(marker)?;
        let tokens = Tokens::scan(line);
        let header = self.header(line, &tokens, source_file)?;

        match kind {
            MessageKind::LineChangeTotal => recognize_total(&tokens, header).map(OddsMessage::Total),
            MessageKind::LineChangeSpread => {
                recognize_spread(&tokens, header).map(OddsMessage::Spread)
            }
            MessageKind::LineChangeMoney => recognize_money(&tokens, header).map(OddsMessage::Money),
            MessageKind::LineChangeTeamTotal => {
                Some(OddsMessage::TeamTotal(recognize_team_total(&tokens, header)))
            }
        }
    }

    fn header(&self, line: &str, tokens: &Tokens<'_>, source_file: &str) -> Option<MessageHeader> {
        let game_ref = GameRef::new(tokens.raw("gameid")?);
        let bookmaker_id = BookmakerId::new(tokens.raw("bookieid")?.parse().ok()?);

        Some(MessageHeader {
            game_ref,
            bookmaker_id,
            exchange: self.bookmakers.resolve(bookmaker_id),
            period_id: tokens.raw("period").and_then(|p| p.parse().ok()),
            timestamp_ms: RE_LEADING_TIMESTAMP
                .captures(line)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok()),
            source_file: source_file.to_string(),
        })
    }
}

/// Recognize a declaration line.
///
/// Qualifies when the line has at least 11 tilde fields, fields 9 and 10 are
/// the literal `Over`/`Under` markers, and fields 7 and 8 are non-empty.
/// Table markup lines never qualify.
#[must_use]
pub fn recognize_definition(line: &str) -> Option<PropDefinition> {
    if !line.contains(FIELD_DELIMITER) || line.contains("<table") || line.contains("</table") {
        return None;
    }

    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
    if fields.len() < MIN_DEFINITION_FIELDS {
        return None;
    }
    if fields[9] != OVER_MARKER || fields[10] != UNDER_MARKER {
        return None;
    }

    let (entity_name, prop_type) = (fields[7], fields[8]);
    if entity_name.is_empty() || prop_type.is_empty() {
        return None;
    }

    let n = fields.len();
    let mut game_refs: Vec<GameRef> = Vec::new();
    for raw in [fields[0], fields[1], fields[2], fields[n - 6], fields[n - 5]] {
        if raw.is_empty() || game_refs.iter().any(|g| g.as_str() == raw) {
            continue;
        }
        game_refs.push(GameRef::new(raw));
    }

    let mut definition = PropDefinition::new(entity_name, prop_type);
    definition.game_refs = game_refs;
    Some(definition)
}

fn recognize_total(tokens: &Tokens<'_>, header: MessageHeader) -> Option<OddsEvent> {
    Some(OddsEvent {
        over_price: tokens.decimal("newoverjuice")?,
        under_price: tokens.decimal("newunderjuice")?,
        over_line: tokens.decimal("newover")?,
        under_line: tokens.decimal("newunder")?,
        header,
    })
}

fn recognize_spread(tokens: &Tokens<'_>, header: MessageHeader) -> Option<SpreadChange> {
    Some(SpreadChange {
        visitor_price: tokens.decimal("newvisitorjuice")?,
        home_price: tokens.decimal("newhomejuice")?,
        visitor_spread: tokens.decimal("newvisitorspread")?,
        home_spread: tokens.decimal("newhomespread")?,
        header,
    })
}

fn recognize_money(tokens: &Tokens<'_>, header: MessageHeader) -> Option<MoneyChange> {
    Some(MoneyChange {
        visitor_price: tokens.decimal("newvisitorjuice")?,
        home_price: tokens.decimal("newhomejuice")?,
        header,
    })
}

fn recognize_team_total(tokens: &Tokens<'_>, header: MessageHeader) -> TeamTotalChange {
    let quote = |team: &str| TeamTotalQuote {
        over_line: tokens.decimal(&format!("new{team}over")),
        under_line: tokens.decimal(&format!("new{team}under")),
        over_price: tokens.decimal(&format!("new{team}overjuice")),
        under_price: tokens.decimal(&format!("new{team}underjuice")),
    };
    TeamTotalChange {
        visitor: quote("visitor"),
        home: quote("home"),
        header,
    }
}

/// Numeric `key=value` tokens of one line. The first occurrence of a key wins.
struct Tokens<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> Tokens<'a> {
    fn scan(line: &'a str) -> Self {
        let mut values = HashMap::new();
        for caps in RE_NUMERIC_TOKEN.captures_iter(line) {
            if let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) {
                values.entry(key.as_str()).or_insert(value.as_str());
            }
        }
        Self { values }
    }

    fn raw(&self, key: &str) -> Option<&'a str> {
        self.values.get(key).copied()
    }

    fn decimal(&self, key: &str) -> Option<Decimal> {
        self.raw(key)?.trim_end_matches('.').parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const DECLARATION: &str =
        "5512~5513~5514~NFL~1~2~3~Travis Kelce~Rec Yds~Over~Under~x~y~9001~9002~a~b~c~d";
    const TOTAL: &str = "1700000000123 @messageType=LineChangeTotal@gameid=9912@period=1@bookieid=807@newover=60.5@newunder=60.5@newoverjuice=-130@newunderjuice=110";

    #[test]
    fn declaration_yields_player_prop_and_game_refs() {
        let definition = recognize_definition(DECLARATION).unwrap();
        assert_eq!(definition.entity_name, "Travis Kelce");
        assert_eq!(definition.prop_type, "Rec Yds");
        assert_eq!(definition.line, None);
        let refs: Vec<&str> = definition.game_refs.iter().map(GameRef::as_str).collect();
        assert_eq!(refs, ["5512", "5513", "5514", "9001", "9002"]);
    }

    #[test]
    fn short_or_unmarked_declarations_are_skipped() {
        assert!(recognize_definition("a~b~c~d~e~f~g~Name~Type~Over").is_none());
        assert!(recognize_definition("0~1~2~3~4~5~6~Name~Type~Yes~No~7").is_none());
        assert!(recognize_definition("0~1~2~3~4~5~6~~Type~Over~Under~7").is_none());
        assert!(recognize_definition("<table>0~1~2~3~4~5~6~Name~Type~Over~Under</table>").is_none());
    }

    #[test]
    fn total_line_change_is_read_by_key() {
        let parser = EventLogParser::default();
        let Some(LogRecord::Message(OddsMessage::Total(event))) = parser.parse_line(TOTAL, "0.txt")
        else {
            panic!("expected a total event");
        };

        assert_eq!(event.over_line, dec!(60.5));
        assert_eq!(event.under_price, dec!(110));
        assert_eq!(event.over_price, dec!(-130));
        assert_eq!(event.header.bookmaker_id, BookmakerId::new(807));
        assert_eq!(event.header.exchange.as_str(), "ProphetX");
        assert_eq!(event.header.game_ref.as_str(), "9912");
        assert_eq!(event.header.period_id, Some(1));
        assert_eq!(event.header.timestamp_ms, Some(1_700_000_000_123));
        assert_eq!(event.header.source_file, "0.txt");
    }

    #[test]
    fn token_order_does_not_matter() {
        let parser = EventLogParser::default();
        let line = "@newunderjuice=-105@bookieid=1@newunder=7.@gameid=3@newoverjuice=-115@newover=7.5@messageType=LineChangeTotal";
        let Some(LogRecord::Message(OddsMessage::Total(event))) = parser.parse_line(line, "1.txt")
        else {
            panic!("expected a total event");
        };
        assert_eq!(event.under_line, dec!(7));
        assert_eq!(event.header.exchange.as_str(), "Other");
        assert_eq!(event.header.timestamp_ms, None);
    }

    #[test]
    fn missing_required_tokens_skip_the_line() {
        let parser = EventLogParser::default();
        let without_bookie = TOTAL.replace("@bookieid=807", "");
        let without_juice = TOTAL.replace("@newunderjuice=110", "");
        let unknown_type = TOTAL.replace("LineChangeTotal", "ScoreChange");

        assert!(parser.parse_line(&without_bookie, "0.txt").is_none());
        assert!(parser.parse_line(&without_juice, "0.txt").is_none());
        assert!(parser.parse_line(&unknown_type, "0.txt").is_none());
        assert!(parser.parse_line("", "0.txt").is_none());
    }

    #[test]
    fn other_message_kinds_are_typed() {
        let parser = EventLogParser::default();
        let content = "\
@messageType=LineChangeSpread@gameid=1@bookieid=624@newvisitorjuice=-110@newhomejuice=-110@newvisitorspread=-3.5@newhomespread=3.5
@messageType=LineChangeMoney@gameid=1@bookieid=624@newvisitorjuice=150@newhomejuice=-170
@messageType=LineChangeTeamTotal@gameid=1@bookieid=624@newhomeover=24.5@newhomeoverjuice=-115
@messageType=LineChangeMoney@gameid=1@bookieid=624@newvisitorjuice=150";

        let log = parser.parse_str(content, "2.txt");
        let kinds: Vec<MessageKind> = log.messages.iter().map(OddsMessage::kind).collect();
        assert_eq!(
            kinds,
            [
                MessageKind::LineChangeSpread,
                MessageKind::LineChangeMoney,
                MessageKind::LineChangeTeamTotal
            ]
        );
        assert_eq!(log.odds_events().count(), 0);

        let OddsMessage::TeamTotal(team_total) = &log.messages[2] else {
            panic!("expected a team total");
        };
        assert_eq!(team_total.home.over_line, Some(dec!(24.5)));
        assert_eq!(team_total.home.over_price, Some(dec!(-115)));
        assert_eq!(team_total.visitor, TeamTotalQuote::default());
    }

    #[test]
    fn content_keeps_line_order() {
        let parser = EventLogParser::default();
        let content = format!("{DECLARATION}\nnoise line\n{TOTAL}\n{DECLARATION}");
        let log = parser.parse_str(&content, "initGameMesgs.txt");
        assert_eq!(log.definitions.len(), 2);
        assert_eq!(log.messages.len(), 1);
    }
}
