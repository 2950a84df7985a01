//! Shared CLI output helpers for consistent operator-facing text.
//!
//! Human output goes to stdout with colored status symbols. With `--json`
//! every helper emits one `{"type": ..., "payload": ...}` line instead, and
//! `--quiet` suppresses everything except warnings and errors.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::{OwoColorize, Stream};
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON lines instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

fn suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("header", json!({ "app": "propmatch", "version": version }));
        return;
    }
    if suppressed(config) {
        return;
    }

    println!(
        "{} {}",
        "propmatch".if_supports_color(Stream::Stdout, |t| t.bold()),
        version.if_supports_color(Stream::Stdout, |t| t.dimmed())
    );
}

/// Print a section header.
pub fn section(title: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("section", json!({ "title": title }));
        return;
    }
    if suppressed(config) {
        return;
    }

    println!();
    println!("{}", title.if_supports_color(Stream::Stdout, |t| t.bold()));
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();
    if config.json {
        emit_json_line("field", json!({ "label": label, "value": value }));
        return;
    }
    if suppressed(config) {
        return;
    }

    println!(
        "  {:<16} {}",
        label.if_supports_color(Stream::Stdout, |t| t.dimmed()),
        value
    );
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    if suppressed(config) {
        return;
    }

    println!(
        "  {} {}",
        "✓".if_supports_color(Stream::Stdout, |t| t.green()),
        message
    );
}

/// Print a warning line.
pub fn warning(message: &str) {
    if is_json() {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }

    println!(
        "  {} {}",
        "⚠".if_supports_color(Stream::Stdout, |t| t.yellow()),
        message
    );
}

/// Print a dimmed note.
pub fn note(message: &str) {
    let config = read_config();
    if config.json {
        emit_json_line("note", json!({ "message": message }));
        return;
    }
    if suppressed(config) {
        return;
    }

    println!("  {}", message.if_supports_color(Stream::Stdout, |t| t.dimmed()));
}

/// Print rows as an indented table, or as one JSON line per row.
pub fn table<T: Tabled + serde::Serialize>(kind: &str, rows: &[T]) {
    let config = read_config();
    if config.json {
        for row in rows {
            emit_json_line(kind, json!(row));
        }
        return;
    }
    if suppressed(config) || rows.is_empty() {
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!();
    for line in table.to_string().lines() {
        println!("  {line}");
    }
}

/// Format a value in cyan.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.if_supports_color(Stream::Stdout, |t| t.cyan()))
}

/// Format a signed value green when positive, red when negative.
pub fn signed(value: impl Display, positive: bool) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    if positive {
        format!("{}", value.if_supports_color(Stream::Stdout, |t| t.green()))
    } else {
        format!("{}", value.if_supports_color(Stream::Stdout, |t| t.red()))
    }
}
