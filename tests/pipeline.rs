use std::fs;
use std::path::PathBuf;

use fbref_pizza::config::PizzaConfig;
use fbref_pizza::dataset::{SeasonTable, parse_season_table_json};
use fbref_pizza::error::{FilterStage, PizzaError};
use fbref_pizza::percentile::PercentileKind;
use fbref_pizza::pipeline::{PizzaRequest, players_for_request, run_pizza};
use fbref_pizza::pizza_export::{export_json, export_workbook, report_to_json};
use fbref_pizza::presentation::LabelStyle;
use fbref_pizza::stat_columns::Position;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn season() -> SeasonTable {
    parse_season_table_json("2024-2025", &read_fixture("season_2024_2025.json"))
        .expect("fixture should parse")
}

fn request(player: &str, position: Position) -> PizzaRequest {
    PizzaRequest {
        season: "2024-2025".to_string(),
        league: "Premier League".to_string(),
        position,
        min_minutes: 100,
        squad: None,
        player: player.to_string(),
        per_90: false,
    }
}

#[test]
fn forward_totals_report() {
    let report = run_pizza(&season(), &request("Mohamed Salah", Position::Forward), &PizzaConfig::default())
        .expect("report should build");

    // Haaland, Salah, Watkins and Saka (secondary FW).
    assert_eq!(report.cohort_size, 4);
    assert_eq!(report.minutes_played, 3150);
    let names: Vec<&str> = report.results.iter().map(|r| r.column.name.as_str()).collect();
    assert_eq!(names, vec!["Goals", "Assists", "Shots"]);
    assert!(report.results.iter().all(|r| r.percentile == 100 && r.rank == 1));

    assert_eq!(report.slices.len(), 3);
    assert_eq!(report.slices[0].label, "Goals\n(29.00)\nRank: 1");
    assert_eq!(report.slices[0].value, 100);
    assert_eq!(report.title, "Mohamed Salah | Premier League | FW | 3150 Minutes played");
    assert_eq!(
        report.caption,
        "Compared to other FW | Premier League | 2024-2025 season | Min. 100 minutes played"
    );
}

#[test]
fn per_90_changes_goal_standing() {
    let mut req = request("Mohamed Salah", Position::Forward);
    req.per_90 = true;
    let report = run_pizza(&season(), &req, &PizzaConfig::default()).unwrap();

    let goals = &report.results[0];
    assert_eq!(goals.column.name, "Goals");
    assert_eq!(goals.rank, 2);
    assert_eq!(goals.percentile, 75);
    assert_eq!(report.slices[0].label, "Goals\n(0.83)\nRank: 2");
    // Minutes are taken from the raw table, not the normalized one.
    assert_eq!(report.minutes_played, 3150);
}

#[test]
fn defender_lower_is_better_columns_flip() {
    let report = run_pizza(&season(), &request("William Saliba", Position::Defender), &PizzaConfig::default())
        .unwrap();
    // Lewis Hall is under the minutes threshold.
    assert_eq!(report.cohort_size, 2);

    let names: Vec<&str> = report.results.iter().map(|r| r.column.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Assists", "Yellow Cards", "Pass %", "Tackles Won", "Clearances", "Fouls Committed"]
    );
    let by_name = |name: &str| report.results.iter().find(|r| r.column.name == name).unwrap();

    let cards = by_name("Yellow Cards");
    assert_eq!(cards.raw_value, 3.0);
    assert_eq!(cards.percentile, 50);
    assert_eq!(cards.rank, 1);

    let fouls = by_name("Fouls Committed");
    assert_eq!(fouls.raw_value, 22.0);
    assert_eq!(fouls.percentile, 0);
    assert_eq!(fouls.rank, 2);

    let clearances = by_name("Clearances");
    assert_eq!(clearances.percentile, 50);
    assert_eq!(clearances.rank, 2);
}

#[test]
fn squad_narrows_picker_not_comparison() {
    let mut req = request("Mohamed Salah", Position::Forward);
    req.squad = Some("Liverpool".to_string());
    assert_eq!(players_for_request(&season(), &req).unwrap(), vec!["Mohamed Salah"]);

    let report = run_pizza(&season(), &req, &PizzaConfig::default()).unwrap();
    assert_eq!(report.cohort_size, 4);

    req.squad = Some("Arsenal".to_string());
    let err = run_pizza(&season(), &req, &PizzaConfig::default()).unwrap_err();
    assert!(matches!(err, PizzaError::PlayerNotFound(ref p) if p == "Mohamed Salah"));
}

#[test]
fn picker_for_forwards() {
    let req = request("", Position::Forward);
    assert_eq!(
        players_for_request(&season(), &req).unwrap(),
        vec!["Bukayo Saka", "Erling Haaland", "Mohamed Salah", "Ollie Watkins"]
    );
}

#[test]
fn empty_filters_halt_before_the_engine() {
    let mut req = request("Mohamed Salah", Position::Forward);
    req.min_minutes = 5000;
    let err = run_pizza(&season(), &req, &PizzaConfig::default()).unwrap_err();
    assert!(matches!(err, PizzaError::EmptyCohort { stage: FilterStage::Exposure, .. }));

    let mut req = request("Ollie Watkins", Position::Defender);
    req.squad = Some("Aston Villa".to_string());
    let err = run_pizza(&season(), &req, &PizzaConfig::default()).unwrap_err();
    assert!(matches!(err, PizzaError::EmptyCohort { stage: FilterStage::Selection, .. }));
}

#[test]
fn player_from_another_league_is_not_found() {
    let err = run_pizza(&season(), &request("Kylian Mbappe", Position::Forward), &PizzaConfig::default())
        .unwrap_err();
    assert!(matches!(err, PizzaError::PlayerNotFound(_)));
    assert_eq!(err.to_string(), "no data for player Kylian Mbappe");
}

#[test]
fn config_controls_convention_and_labels() {
    let config = PizzaConfig {
        label_style: LabelStyle::Plain,
        percentile_kind: PercentileKind::Mean,
        ..PizzaConfig::default()
    };
    let report = run_pizza(&season(), &request("Mohamed Salah", Position::Forward), &config).unwrap();
    assert_eq!(report.results[0].percentile, 87);
    assert_eq!(report.results[0].rank, 1);
    assert_eq!(report.slices[0].label, "Goals\n(29.00)");
}

#[test]
fn renderer_json_pairs_labels_with_values() {
    let report = run_pizza(&season(), &request("William Saliba", Position::Defender), &PizzaConfig::default())
        .unwrap();
    let json = report_to_json(&report).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();

    let params = doc["params"].as_array().unwrap();
    let values = doc["values"].as_array().unwrap();
    assert_eq!(params.len(), report.slices.len());
    assert_eq!(values.len(), report.slices.len());
    assert_eq!(params[1], "Yellow Cards\n(3.00)\nRank: 1");
    assert_eq!(values[1], 50);
    assert_eq!(doc["report"]["request"]["position"], "DF");
    assert!(doc["generated_at"].as_str().is_some_and(|s| !s.is_empty()));
}

#[test]
fn exports_land_on_disk() {
    let report = run_pizza(&season(), &request("Mohamed Salah", Position::Forward), &PizzaConfig::default())
        .unwrap();
    let dir = std::env::temp_dir().join(format!("fbref_pizza_export_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let json_path = dir.join("salah.json");
    export_json(&json_path, &report).unwrap();
    assert!(fs::read_to_string(&json_path).unwrap().contains("Mohamed Salah"));

    let xlsx_path = dir.join("salah.xlsx");
    export_workbook(&xlsx_path, &report).unwrap();
    assert!(fs::metadata(&xlsx_path).unwrap().len() > 0);

    fs::remove_dir_all(&dir).ok();
}
