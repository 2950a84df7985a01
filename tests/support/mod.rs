#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use propmatch::config::Config;
use tempfile::TempDir;

pub const CATALOG_HEADER: &str = "id,entity_name,league,team,type_display,line";

/// A scratch capture directory laid out like a real run.
pub struct Capture {
    dir: TempDir,
}

impl Capture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root().join("catalog.csv")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root().join("capture")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("out")
    }

    /// Write the catalog feed with a header row.
    pub fn write_catalog(&self, rows: &[&str]) -> &Self {
        let mut content = String::from(CATALOG_HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        fs::write(self.catalog_path(), content).expect("write catalog");
        self
    }

    /// Write one event log file into the capture directory.
    pub fn write_log(&self, name: &str, lines: &[String]) -> &Self {
        fs::create_dir_all(self.log_dir()).expect("create capture dir");
        fs::write(self.log_dir().join(name), lines.join("\n")).expect("write log file");
        self
    }

    /// Default configuration pointed at this capture.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.inputs.catalog = self.catalog_path();
        config.inputs.event_log_dir = self.log_dir();
        config.output.dir = self.output_dir();
        config
    }

    pub fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.output_dir().join(name)).expect("read output file")
    }
}

/// A tilde-delimited declaration line for one player market.
pub fn declaration(game: u32, player: &str, prop_type: &str) -> String {
    format!(
        "{game}~{}~{}~NFL~0~0~0~{player}~{prop_type}~Over~Under~0~0~{}~{}~x~x~x~x",
        game + 1,
        game + 2,
        game + 100,
        game + 101
    )
}

/// A `LineChangeTotal` message line.
pub fn total(game: u32, bookie: u32, line: &str, over_juice: i32, under_juice: i32) -> String {
    format!(
        "1700000000000 @messageType=LineChangeTotal@gameid={game}@period=0@bookieid={bookie}\
         @newover={line}@newunder={line}@newoverjuice={over_juice}@newunderjuice={under_juice}"
    )
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 5, 18, 30, 0).unwrap()
}

/// Catalog and log for a small slate: two props priced, one declared
/// without prices, one never declared.
pub fn sample_capture() -> Capture {
    let capture = Capture::new();
    capture.write_catalog(&[
        "p1,Travis Kelce,nfl,KC,Receiving Yards,60.5",
        "p2,Patrick Mahomes,nfl,KC,Passing Yards,265.5",
        "p3,Isiah Pacheco,nfl,KC,Rushing Yards,55.5",
        "p4,Rashee Rice,nfl,KC,Receptions,5.5",
    ]);
    capture.write_log(
        "initGameMesgs.txt",
        &[
            "<table>~~~</table>".to_string(),
            declaration(7000, "Travis Kelce", "Rec Yds"),
            declaration(7000, "Patrick Mahomes", "Pass Yds"),
            declaration(7000, "Rashee Rice", "Rec"),
        ],
    );
    capture.write_log(
        "0.txt",
        &[
            total(9100, 807, "60.5", -130, 110),
            total(9100, 624, "60.5", -140, 120),
            total(9200, 999, "265.5", -110, -110),
            "@messageType=LineChangeSpread@gameid=9100@bookieid=807@newvisitorjuice=-110@newhomejuice=-110@newvisitorspread=-3.5@newhomespread=3.5".to_string(),
            "@messageType=LineChangeTotal@gameid=9100@newover=60.5@newunder=60.5@newoverjuice=-500@newunderjuice=400".to_string(),
        ],
    );
    capture
}
