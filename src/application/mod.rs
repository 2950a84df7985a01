//! Pipeline stages between the feed readers and the report writers.
//!
//! Stages run strictly in order: normalize, match, aggregate, assemble.
//! [`pipeline::Pipeline`] wires them to the adapters for one batch run.

pub mod aggregate;
pub mod dataset;
pub mod inspect;
pub mod matcher;
pub mod normalize;
pub mod pipeline;

pub use aggregate::Aggregator;
pub use dataset::{Dataset, DatasetBuilder, Metadata};
pub use inspect::{Inspection, LogStats};
pub use matcher::{MatchOutcome, MatchSettings, Matcher};
pub use normalize::{Normalizer, PropKey, PropTypeSynonyms};
pub use pipeline::{Pipeline, RunReport};
