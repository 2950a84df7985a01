//! File-facing adapters: feed readers and report writers.

pub mod catalog;
pub mod event_log;
pub mod report;

pub use catalog::CatalogParser;
pub use event_log::{EventLogParser, LogRecord};
pub use report::ReportWriter;
