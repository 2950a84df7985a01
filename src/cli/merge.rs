//! Handler for the `merge` command.

use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::application::{Pipeline, RunReport};
use crate::cli::command::MergeArgs;
use crate::cli::{load_config, output};
use crate::domain::MergedProp;
use crate::error::Result;

#[derive(Tabled, Serialize)]
struct PropRow {
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Prop Type")]
    prop_type: String,
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Avg Odds")]
    average_odds: i64,
    #[tabled(rename = "Win %")]
    win_pct: String,
    #[tabled(rename = "Exchanges")]
    exchanges: String,
}

impl From<&MergedProp> for PropRow {
    fn from(prop: &MergedProp) -> Self {
        let exchanges: Vec<&str> = prop.exchanges.iter().map(|e| e.as_str()).collect();
        Self {
            player: prop.entity_name.clone(),
            prop_type: prop.prop_type.clone(),
            line: prop.line.normalize().to_string(),
            average_odds: prop.average_price,
            win_pct: format!("{:.2}", prop.win_probability_pct),
            exchanges: if exchanges.is_empty() {
                "None".into()
            } else {
                exchanges.join(", ")
            },
        }
    }
}

/// Execute the merge command.
pub fn execute(args: &MergeArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(catalog) = &args.catalog {
        config.inputs.catalog = catalog.clone();
    }
    if let Some(dir) = &args.event_log_dir {
        config.inputs.event_log_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }
    config
        .logging
        .clone()
        .with_overrides(args.log.log_level.as_deref(), args.log.json_logs)
        .init();

    let pipeline = Pipeline::from_config(&config)?;
    info!(catalog = %pipeline.catalog_path().display(), "propmatch merge starting");
    let report = pipeline.run()?;
    print_summary(&report, args.top);
    Ok(())
}

fn print_summary(report: &RunReport, top: usize) {
    let metadata = &report.dataset.metadata;

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Inputs");
    output::field("Catalog props", metadata.total_splash_props);
    output::field("Declarations", report.definitions);
    output::field("Total events", report.odds_events);
    output::field("Bookmakers", metadata.all_available_bookie_ids.len());
    let exchanges: Vec<&str> = metadata
        .all_available_exchanges
        .iter()
        .map(|e| e.as_str())
        .collect();
    output::field("Exchanges", exchanges.join(", "));

    output::section("Matching");
    output::field("Confirmed", report.confirmed);
    output::field("Correlations", report.matched_odds);
    output::field(
        "Matched props",
        format!(
            "{} ({:.1}%)",
            metadata.matched_props,
            report.dataset.match_rate_pct()
        ),
    );

    match report.dataset.props.first() {
        Some(best) => output::field(
            "Top prop",
            format!(
                "{} {} {} at {} ({}%)",
                best.entity_name,
                best.prop_type,
                best.line.normalize(),
                best.average_price,
                output::highlight(format!("{:.2}", best.win_probability_pct))
            ),
        ),
        None => output::warning("No catalog entry matched the event log"),
    }

    let rows: Vec<PropRow> = report
        .dataset
        .props
        .iter()
        .take(top)
        .map(PropRow::from)
        .collect();
    output::table("prop", &rows);

    output::section("Output");
    output::success(&format!("Wrote {}", report.json_path.display()));
    output::success(&format!("Wrote {}", report.csv_path.display()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogEntry, Exchange};
    use rust_decimal_macros::dec;

    #[test]
    fn rows_render_exchanges_and_rounded_values() {
        let mut prop =
            MergedProp::unmatched(&CatalogEntry::new("p1", "Travis Kelce", "Rec Yds", dec!(60.50)));
        prop.average_price = -135;
        prop.win_probability_pct = dec!(57.45);
        prop.exchanges = vec![Exchange::new("ProphetX"), Exchange::new("Novig")];

        let row = PropRow::from(&prop);
        assert_eq!(row.line, "60.5");
        assert_eq!(row.win_pct, "57.45");
        assert_eq!(row.exchanges, "ProphetX, Novig");
    }

    #[test]
    fn rows_without_exchanges_say_none() {
        let prop = MergedProp::unmatched(&CatalogEntry::new("p1", "A", "Rec", dec!(1.5)));
        assert_eq!(PropRow::from(&prop).exchanges, "None");
    }
}
