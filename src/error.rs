use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Which filtering step left nothing behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterStage {
    /// Minimum-minutes threshold on the season+league table.
    Exposure,
    /// Squad and position narrowing after the exposure cut.
    Selection,
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterStage::Exposure => f.write_str("minimum minutes filter"),
            FilterStage::Selection => f.write_str("squad/position filter"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PizzaError {
    #[error("no players left after the {stage} (min. {min_minutes} minutes played); adjust the filters")]
    EmptyCohort { stage: FilterStage, min_minutes: u32 },

    #[error("no data for player {0}")]
    PlayerNotFound(String),

    #[error("player {player} has no value for column {column}")]
    MissingColumn { player: String, column: String },

    #[error("unknown position {0} (expected FW, MF or DF)")]
    UnknownPosition(String),

    #[error("dataset: {0:#}")]
    Dataset(#[from] anyhow::Error),
}

impl PizzaError {
    /// Expected outcomes of a selection that should be shown as a warning,
    /// as opposed to broken input data.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, PizzaError::Dataset(_))
    }
}
