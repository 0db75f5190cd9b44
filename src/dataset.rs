use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::stat_columns::Position;

/// Seasons offered by the picker, newest first.
pub const SEASONS: [&str; 3] = ["2024-2025", "2023-2024", "2022-2023"];

const SEASON_FILE: &str = "top5.json";

const PLAYER_KEY: &str = "Player";
const SQUAD_KEY: &str = "Squad";
const LEAGUE_KEY: &str = "League";
const POSITION_PRIMARY_KEY: &str = "Position Primary";
const POSITION_SECONDARY_KEY: &str = "Position Secondary";
const NINETIES_KEY: &str = "90s";

/// One player-season row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRecord {
    pub player: String,
    pub squad: String,
    pub league: String,
    pub position_primary: String,
    pub position_secondary: Option<String>,
    /// Minutes played divided by 90.
    pub nineties: f64,
    pub stats: HashMap<String, f64>,
}

impl StatRecord {
    pub fn new(
        player: impl Into<String>,
        squad: impl Into<String>,
        league: impl Into<String>,
        position_primary: impl Into<String>,
        nineties: f64,
    ) -> Self {
        Self {
            player: player.into(),
            squad: squad.into(),
            league: league.into(),
            position_primary: position_primary.into(),
            position_secondary: None,
            nineties,
            stats: HashMap::new(),
        }
    }

    pub fn with_secondary(mut self, position: impl Into<String>) -> Self {
        self.position_secondary = Some(position.into());
        self
    }

    pub fn with_stat(mut self, column: impl Into<String>, value: f64) -> Self {
        self.stats.insert(column.into(), value);
        self
    }

    pub fn stat(&self, column: &str) -> Option<f64> {
        self.stats.get(column).copied()
    }

    /// Primary or secondary position match.
    pub fn plays_position(&self, position: Position) -> bool {
        let code = position.code();
        self.position_primary == code || self.position_secondary.as_deref() == Some(code)
    }

    pub fn minutes_played(&self) -> u32 {
        (self.nineties * 90.0).floor().max(0.0) as u32
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeasonTable {
    pub season: String,
    pub records: Vec<StatRecord>,
}

impl SeasonTable {
    pub fn new(season: impl Into<String>, records: Vec<StatRecord>) -> Self {
        Self {
            season: season.into(),
            records,
        }
    }

    pub fn columns(&self) -> BTreeSet<&str> {
        self.records
            .iter()
            .flat_map(|r| r.stats.keys().map(String::as_str))
            .collect()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.records.iter().any(|r| r.stats.contains_key(column))
    }
}

/// Sorted unique league names.
pub fn leagues(table: &SeasonTable) -> Vec<String> {
    let set: BTreeSet<&str> = table.records.iter().map(|r| r.league.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Sorted unique squads playing in `league`.
pub fn squads_in_league(table: &SeasonTable, league: &str) -> Vec<String> {
    let set: BTreeSet<&str> = table
        .records
        .iter()
        .filter(|r| r.league == league)
        .map(|r| r.squad.as_str())
        .collect();
    set.into_iter().map(str::to_string).collect()
}

/// Parses a season table exported as a JSON array of row objects keyed by
/// FBref column names. Non-numeric extra columns are ignored.
pub fn parse_season_table_json(season: &str, raw: &str) -> Result<SeasonTable> {
    let root: Value = serde_json::from_str(raw).context("invalid season json")?;
    let rows = match root {
        Value::Null => return Ok(SeasonTable::new(season, Vec::new())),
        Value::Array(rows) => rows,
        other => {
            return Err(anyhow!(
                "season json must be an array of rows, got {}",
                value_kind(&other)
            ));
        }
    };

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;
    for (idx, row) in rows.iter().enumerate() {
        let Some(obj) = row.as_object() else {
            skipped += 1;
            continue;
        };
        match record_from_object(obj) {
            Some(record) => records.push(record),
            None => {
                log::debug!("skipping season row {idx}: missing identity or 90s");
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        log::warn!("{season}: skipped {skipped} malformed rows");
    }
    Ok(SeasonTable::new(season, records))
}

pub fn load_season_table(season: &str, path: &Path) -> Result<SeasonTable> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read season table {}", path.display()))?;
    parse_season_table_json(season, &raw)
        .with_context(|| format!("parse season table {}", path.display()))
}

/// Read-only season tables, loaded once per season on first use.
#[derive(Debug)]
pub struct SeasonStore {
    data_dir: PathBuf,
    tables: HashMap<String, SeasonTable>,
}

impl SeasonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            tables: HashMap::new(),
        }
    }

    pub fn season_path(&self, season: &str) -> PathBuf {
        self.data_dir.join(season).join(SEASON_FILE)
    }

    pub fn is_loaded(&self, season: &str) -> bool {
        self.tables.contains_key(season)
    }

    pub fn table(&mut self, season: &str) -> Result<&SeasonTable> {
        if !self.tables.contains_key(season) {
            let path = self.season_path(season);
            let table = load_season_table(season, &path)?;
            log::debug!("loaded {} rows for season {season}", table.records.len());
            self.tables.insert(season.to_string(), table);
        }
        self.tables
            .get(season)
            .ok_or_else(|| anyhow!("season {season} missing after load"))
    }
}

fn record_from_object(obj: &Map<String, Value>) -> Option<StatRecord> {
    let player = text_field(obj, PLAYER_KEY)?;
    let squad = text_field(obj, SQUAD_KEY)?;
    let league = text_field(obj, LEAGUE_KEY)?;
    let position_primary = text_field(obj, POSITION_PRIMARY_KEY)?;
    let position_secondary = text_field(obj, POSITION_SECONDARY_KEY);
    let nineties = obj.get(NINETIES_KEY).and_then(number_value)?;

    let stats = obj
        .iter()
        .filter(|(key, _)| !is_identity_key(key))
        .filter_map(|(key, value)| number_value(value).map(|v| (key.clone(), v)))
        .collect();

    Some(StatRecord {
        player,
        squad,
        league,
        position_primary,
        position_secondary,
        nineties,
        stats,
    })
}

fn is_identity_key(key: &str) -> bool {
    matches!(
        key,
        PLAYER_KEY
            | SQUAD_KEY
            | LEAGUE_KEY
            | POSITION_PRIMARY_KEY
            | POSITION_SECONDARY_KEY
            | NINETIES_KEY
    )
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    let s = obj.get(key)?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    // FBref exports thousands separators on large counts.
    let cleaned = s.replace(',', "");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
