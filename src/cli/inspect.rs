//! Handler for the `inspect` command.

use chrono::Utc;

use crate::adapter::report::write_json_file;
use crate::adapter::EventLogParser;
use crate::application::Inspection;
use crate::cli::command::InspectArgs;
use crate::cli::{load_config, output};
use crate::error::Result;

/// Execute the inspect command.
pub fn execute(args: &InspectArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(dir) = &args.event_log_dir {
        config.inputs.event_log_dir = dir.clone();
    }
    config
        .logging
        .clone()
        .with_overrides(args.log.log_level.as_deref(), args.log.json_logs)
        .init();

    let parser = EventLogParser::new(config.bookmaker_table()?);
    let log = parser.parse_files(&config.inputs.event_log_paths())?;
    let inspection = Inspection::new(log, config.inputs.event_log_dir.clone(), Utc::now());
    let stats = inspection.stats();

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Event log");
    output::field("Directory", config.inputs.event_log_dir.display());
    output::field("Declarations", stats.definitions);
    output::field("Messages", stats.messages);

    output::section("Message types");
    if stats.messages_by_kind.is_empty() {
        output::note("(none)");
    }
    for (kind, count) in &stats.messages_by_kind {
        output::field(kind.as_str(), count);
    }

    output::section("Exchanges");
    if stats.messages_by_exchange.is_empty() {
        output::note("(none)");
    }
    for (exchange, count) in &stats.messages_by_exchange {
        output::field(exchange.as_str(), count);
    }

    output::section("Game references");
    output::field("Declarations", stats.definition_game_refs);
    output::field("Messages", stats.message_game_refs);
    output::field("Shared", stats.overlapping_game_refs);
    if stats.has_disjoint_game_refs() {
        output::warning("No game references are shared between declarations and messages");
        output::note(&format!(
            "declaration-only sample: {}",
            join_refs(&stats.definition_only_sample)
        ));
        output::note(&format!(
            "message-only sample: {}",
            join_refs(&stats.message_only_sample)
        ));
    }

    if let Some(path) = &args.output {
        write_json_file(&inspection, path)?;
        output::success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}

fn join_refs(refs: &[crate::domain::GameRef]) -> String {
    refs.iter()
        .take(5)
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
