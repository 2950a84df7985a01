//! Propmatch - reconcile a prop catalog feed with a live odds event log.
//!
//! The two feeds describe the same player propositions but share no
//! identifier. Propmatch joins them on normalized player name, prop type and
//! line proximity, then folds every correlated bookmaker price into one
//! merged record per catalog entry with an implied win probability.
//!
//! # Modules
//!
//! - [`adapter`] - catalog and event log readers, JSON and CSV writers
//! - [`application`] - normalization, matching, aggregation, dataset assembly
//! - [`cli`] - `merge`, `inspect` and `odds` commands
//! - [`config`] - TOML configuration with built-in defaults
//! - [`domain`] - feed-agnostic types and American odds math
//! - [`error`] - error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use propmatch::application::Pipeline;
//! use propmatch::config::Config;
//!
//! let config = Config::load("propmatch.toml")?;
//! let report = Pipeline::from_config(&config)?.run()?;
//! println!("{} props matched", report.dataset.props.len());
//! # Ok::<(), propmatch::error::Error>(())
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
