//! Command-line interface: argument parsing and per-command handlers.

pub mod command;
pub mod inspect;
pub mod merge;
pub mod odds;
pub mod output;

use std::path::Path;

pub use command::{Cli, ColorChoice, Commands};

use crate::config::Config;
use crate::error::Result;

/// Apply global flags and dispatch to the selected command.
pub fn run(cli: &Cli) -> Result<()> {
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    match &cli.command {
        Commands::Merge(args) => merge::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Odds(command) => odds::execute(command),
    }
}

/// Load the configuration file, or the built-in defaults when none is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}
