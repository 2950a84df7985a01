//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

/// Reconcile a prop catalog against an odds event log capture.
#[derive(Parser, Debug)]
#[command(name = "propmatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match the catalog against the event log and write the merged dataset
    Merge(MergeArgs),

    /// Parse the event log alone and report what it contains
    Inspect(InspectArgs),

    /// American odds conversions
    #[command(subcommand)]
    Odds(OddsCommand),
}

/// Logging flags shared by commands that read feeds.
#[derive(Args, Debug, Clone, Default)]
pub struct LogArgs {
    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `merge` subcommand.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the catalog feed path
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Override the event log directory
    #[arg(long)]
    pub event_log_dir: Option<PathBuf>,

    /// Override the output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Number of props shown in the summary table
    #[arg(long, default_value_t = 20)]
    pub top: usize,

    #[command(flatten)]
    pub log: LogArgs,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the event log directory
    #[arg(long)]
    pub event_log_dir: Option<PathBuf>,

    /// Write parsed records and statistics to this JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogArgs,
}

/// Subcommands for `propmatch odds`.
#[derive(Subcommand, Debug)]
pub enum OddsCommand {
    /// Implied win probability of an American odds price
    Implied {
        #[arg(allow_negative_numbers = true)]
        odds: i64,
    },
    /// American odds for a win probability given in percent
    American { probability_pct: Decimal },
    /// Probability edge of a market price over an expected price, in points
    Edge {
        #[arg(allow_negative_numbers = true)]
        expected: i64,
        #[arg(allow_negative_numbers = true)]
        market: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "propmatch");
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_merge_defaults() {
        let cli = Cli::try_parse_from(["propmatch", "merge"]).unwrap();
        let Commands::Merge(args) = cli.command else {
            panic!("expected merge");
        };
        assert!(args.config.is_none());
        assert_eq!(args.top, 20);
        assert!(!args.log.json_logs);
        assert!(matches!(cli.color, ColorChoice::Auto));
    }

    #[test]
    fn test_merge_overrides() {
        let cli = Cli::try_parse_from([
            "propmatch",
            "merge",
            "--catalog",
            "feed.csv",
            "--event-log-dir",
            "capture",
            "-o",
            "out",
            "--log-level",
            "debug",
            "--json-logs",
        ])
        .unwrap();
        let Commands::Merge(args) = cli.command else {
            panic!("expected merge");
        };
        assert_eq!(args.catalog, Some(PathBuf::from("feed.csv")));
        assert_eq!(args.event_log_dir, Some(PathBuf::from("capture")));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.log.log_level.as_deref(), Some("debug"));
        assert!(args.log.json_logs);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["propmatch", "inspect", "--json", "-q"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
    }

    #[test]
    fn test_negative_odds_parse() {
        let cli = Cli::try_parse_from(["propmatch", "odds", "edge", "-110", "-135"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Odds(OddsCommand::Edge {
                expected: -110,
                market: -135
            })
        ));
    }
}
