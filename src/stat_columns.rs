use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::PizzaError;

/// Count-type columns that get divided by `90s` when per-90 display is on.
/// Anything not listed here (percentages, per-shot rates) is already a rate.
pub const PER_90_COLUMNS: &[&str] = &[
    "Assists",
    "G+A",
    "Goals without Penalties",
    "Yellow Cards",
    "Red Cards",
    "xAssistedGoals",
    "npxG+xAG",
    "Prog. Carries",
    "Prog. Passes",
    "Progressive Passes received",
    "Goals",
    "Shots",
    "Shots on Target",
    "xG",
    "npxG",
    "Passes played",
    "Progressive Pass Distance",
    "Short Passes Completed",
    "Medium Passes Completed",
    "Long Passes Completed",
    "xA",
    "Key Passes",
    "Passes into final 1/3",
    "Passes into Penalty Area",
    "Crosses into Penalty Area",
    "Through Balls",
    "Crosses",
    "Shot Creating Actions",
    "Goal Creating Actions",
    "Tackles",
    "Tackles Won",
    "Tackles in Defensive 3rd",
    "Tackles in Midfield",
    "Tackles in Attacking 3rd",
    "Dribblers Tackled",
    "Dribbles Challenged",
    "Blocks",
    "Shots Blocked",
    "Interceptions",
    "Tackles + Int",
    "Clearances",
    "Errors leading to shots",
    "Touches",
    "Touches own PA",
    "Touches in Def. 1/3",
    "Touches in Midfield",
    "Touches in Final 1/3",
    "Touches Opp. PA",
    "Take-Ons Attempted",
    "Take-Ons Completed",
    "Carries",
    "Progressive Carries Distance",
    "Carries into final 1/3",
    "Carries into Penalty Area",
    "Dispossesed",
    "Fouls Committed",
    "Fouls drawn",
    "Offsides",
    "Ball Recoveries",
    "Aerials won",
];

/// Columns where a smaller value is the better outcome.
pub const LOWER_IS_BETTER_COLUMNS: &[&str] = &["Yellow Cards", "Fouls Committed"];

const FORWARD_COLUMNS: &[&str] = &[
    "Goals",
    "Assists",
    "Shots",
    "Shots on Target",
    "npxG",
    "Key Passes",
    "Touches in Final 1/3",
    "Touches Opp. PA",
    "Take-Ons Completed",
    "% Successful Take-Ons",
    "Carries into Penalty Area",
    "Ball Recoveries",
    "Aerials won",
    "% Aerials won",
    "npxG per Shot",
    "Fouls drawn",
];

const MIDFIELDER_COLUMNS: &[&str] = &[
    "Assists",
    "Prog. Carries",
    "Prog. Passes",
    "Shots",
    "xG",
    "Pass %",
    "xA",
    "Key Passes",
    "Passes into final 1/3",
    "Tackles Won",
    "Tackles + Int",
    "Take-Ons Completed",
    "% Successful Take-Ons",
    "Carries into final 1/3",
    "Ball Recoveries",
    "Fouls drawn",
    "Fouls Committed",
];

const DEFENDER_COLUMNS: &[&str] = &[
    "Assists",
    "Yellow Cards",
    "Prog. Carries",
    "Prog. Passes",
    "npxG",
    "Pass %",
    "% Long Passes Completed",
    "Passes into final 1/3",
    "Tackles Won",
    "Shots Blocked",
    "Tackles + Int",
    "Clearances",
    "Fouls Committed",
    "Ball Recoveries",
    "Aerials won",
    "% Aerials won",
];

static PER_90_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| PER_90_COLUMNS.iter().copied().collect());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "FW")]
    Forward,
    #[serde(rename = "MF")]
    Midfielder,
    #[serde(rename = "DF")]
    Defender,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Forward, Position::Midfielder, Position::Defender];

    pub fn code(self) -> &'static str {
        match self {
            Position::Forward => "FW",
            Position::Midfielder => "MF",
            Position::Defender => "DF",
        }
    }

    pub fn from_code(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "FW" => Some(Position::Forward),
            "MF" => Some(Position::Midfielder),
            "DF" => Some(Position::Defender),
            _ => None,
        }
    }

    fn column_names(self) -> &'static [&'static str] {
        match self {
            Position::Forward => FORWARD_COLUMNS,
            Position::Midfielder => MIDFIELDER_COLUMNS,
            Position::Defender => DEFENDER_COLUMNS,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = PizzaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_code(s).ok_or_else(|| PizzaError::UnknownPosition(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    HigherBetter,
    LowerBetter,
}

/// One statistic shown on the chart and the way it should be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    pub direction: Direction,
}

impl ColumnSpec {
    /// Builds a spec with the direction taken from [`LOWER_IS_BETTER_COLUMNS`].
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let direction = direction_for(&name);
        Self { name, direction }
    }

    pub fn with_direction(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }

    pub fn is_lower_better(&self) -> bool {
        self.direction == Direction::LowerBetter
    }
}

pub fn direction_for(column: &str) -> Direction {
    if LOWER_IS_BETTER_COLUMNS.contains(&column) {
        Direction::LowerBetter
    } else {
        Direction::HigherBetter
    }
}

pub fn is_per_90_column(column: &str) -> bool {
    PER_90_SET.contains(column)
}

/// Ordered chart columns for a position. Static, independent of the data.
pub fn position_profile(position: Position) -> Vec<ColumnSpec> {
    position
        .column_names()
        .iter()
        .map(|name| ColumnSpec::new(*name))
        .collect()
}
