use serde::{Deserialize, Serialize};

use crate::percentile::PercentileResult;
use crate::stat_columns::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelStyle {
    /// Column name and raw value.
    Plain,
    /// Column name, raw value and rank.
    #[default]
    WithRank,
}

impl LabelStyle {
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "plain" => Some(LabelStyle::Plain),
            "rank" | "with_rank" => Some(LabelStyle::WithRank),
            _ => None,
        }
    }
}

/// One wedge for the radial chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PizzaSlice {
    pub label: String,
    /// Wedge length in [0, 100].
    pub value: u8,
}

pub fn format_label(result: &PercentileResult, style: LabelStyle) -> String {
    match style {
        LabelStyle::Plain => format!("{}\n({:.2})", result.column.name, result.raw_value),
        LabelStyle::WithRank => format!(
            "{}\n({:.2})\nRank: {}",
            result.column.name, result.raw_value, result.rank
        ),
    }
}

pub fn format_labels(results: &[PercentileResult], style: LabelStyle) -> Vec<String> {
    results.iter().map(|r| format_label(r, style)).collect()
}

pub fn pizza_slices(results: &[PercentileResult], style: LabelStyle) -> Vec<PizzaSlice> {
    results
        .iter()
        .map(|r| PizzaSlice {
            label: format_label(r, style),
            value: r.percentile,
        })
        .collect()
}

pub fn chart_title(player: &str, league: &str, position: Position, minutes_played: u32) -> String {
    format!("{player} | {league} | {position} | {minutes_played} Minutes played")
}

pub fn chart_caption(position: Position, league: &str, season: &str, min_minutes: u32) -> String {
    format!(
        "Compared to other {position} | {league} | {season} season | Min. {min_minutes} minutes played"
    )
}
