use std::fs;
use std::path::PathBuf;

use propmatch::config::Config;
use propmatch::domain::BookmakerId;
use propmatch::error::{ConfigError, Error};
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn write_temp_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("propmatch.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

fn load(contents: &str) -> Result<Config, Error> {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_temp_config(&dir, contents);
    Config::load(&path)
}

#[test]
fn full_config_round_trips_into_components() {
    let config = load(
        r#"
[inputs]
catalog = "feeds/catalog.csv"
event_log_dir = "feeds/capture"
event_log_files = ["defs.txt", "live.txt"]

[output]
dir = "build"
json_file = "props.json"

[matching]
definition_tolerance = 1.5
odds_tolerance = 0.25

[exchanges]
priority = ["Novig"]
fallback = "Unknown"

[bookmakers]
"807" = "ProphetX"
" 624 " = "Novig"

[prop_types]
"Rec Yds" = "Receiving Yards"

[logging]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    assert_eq!(
        config.inputs.event_log_paths(),
        vec![
            PathBuf::from("feeds/capture/defs.txt"),
            PathBuf::from("feeds/capture/live.txt")
        ]
    );
    assert_eq!(config.output.json_path(), PathBuf::from("build/props.json"));
    assert_eq!(config.output.csv_path(), PathBuf::from("build/merged_props.csv"));

    let settings = config.match_settings();
    assert_eq!(settings.definition_tolerance, dec!(1.5));
    assert_eq!(settings.odds_tolerance, dec!(0.25));

    let table = config.bookmaker_table().unwrap();
    assert_eq!(table.resolve(BookmakerId::new(624)).as_str(), "Novig");
    assert_eq!(table.resolve(BookmakerId::new(433)).as_str(), "Unknown");

    let synonyms = config.prop_type_synonyms();
    assert_eq!(synonyms.canonical("Pass Yds"), "Pass Yds");
    assert_eq!(synonyms.canonical("rec yds"), "Receiving Yards");
    assert_eq!(config.logging.format, "json");
}

#[test]
fn config_rejects_non_numeric_bookmaker_ids() {
    let result = load(
        r#"
[bookmakers]
"prophet" = "ProphetX"
"#,
    );

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "bookmakers",
            reason,
        })) => assert!(reason.contains("prophet")),
        Err(err) => panic!("Expected invalid bookmaker error, got {err}"),
        Ok(_) => panic!("Expected non-numeric bookmaker id to be rejected"),
    }
}

#[test]
fn config_rejects_chained_prop_type_synonyms() {
    let result = load(
        r#"
[prop_types]
"Rec" = "Receptions"
"Receptions" = "Catches"
"#,
    );

    assert!(
        matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "prop_types",
                ..
            }))
        ),
        "Expected chained synonyms to be rejected"
    );
}

#[test]
fn config_rejects_negative_definition_tolerance() {
    let result = load(
        r#"
[matching]
definition_tolerance = -1.0
"#,
    );

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "definition_tolerance",
            ..
        }))
    ));
}

#[test]
fn config_rejects_empty_event_log_list() {
    let result = load(
        r#"
[inputs]
event_log_files = []
"#,
    );

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField {
            field: "event_log_files"
        }))
    ));
}

#[test]
fn missing_config_file_is_a_read_error() {
    let result = Config::load("/nonexistent/propmatch.toml");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let result = load("[matching\nodds_tolerance = ");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}
