//! Handler for the `odds` command group.

use rust_decimal::Decimal;

use crate::cli::command::OddsCommand;
use crate::cli::output;
use crate::domain::odds::{
    edge_points, implied_probability, probability_to_american, validate_american,
    win_probability_pct,
};
use crate::error::Result;

/// Execute an `odds` subcommand.
pub fn execute(command: &OddsCommand) -> Result<()> {
    match *command {
        OddsCommand::Implied { odds } => implied(odds),
        OddsCommand::American { probability_pct } => american(probability_pct),
        OddsCommand::Edge { expected, market } => edge(expected, market),
    }
}

fn implied(odds: i64) -> Result<()> {
    let odds = validate_american(odds)?;
    output::field("Odds", format_odds(odds));
    output::field("Implied", format!("{}%", win_probability_pct(odds)));
    output::field("Probability", implied_probability(odds).round_dp(6));
    Ok(())
}

fn american(probability_pct: Decimal) -> Result<()> {
    let odds = probability_to_american(probability_pct / Decimal::ONE_HUNDRED)?;
    output::field("Probability", format!("{probability_pct}%"));
    output::field("Odds", format_odds(odds));
    Ok(())
}

fn edge(expected: i64, market: i64) -> Result<()> {
    let expected = validate_american(expected)?;
    let market = validate_american(market)?;
    let points = edge_points(expected, market);

    output::field("Expected", format!("{} ({}%)", format_odds(expected), win_probability_pct(expected)));
    output::field("Market", format!("{} ({}%)", format_odds(market), win_probability_pct(market)));
    output::field(
        "Edge",
        output::signed(format!("{points:+} pts"), points >= Decimal::ZERO),
    );
    Ok(())
}

/// American odds carry an explicit sign when positive.
fn format_odds(odds: i64) -> String {
    if odds > 0 {
        format!("+{odds}")
    } else {
        odds.to_string()
    }
}
