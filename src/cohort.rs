use std::collections::BTreeSet;

use crate::dataset::{SeasonTable, StatRecord};
use crate::error::{FilterStage, PizzaError};
use crate::stat_columns::Position;

/// Minimum-minutes choices offered by the picker.
pub const MINUTE_OPTIONS: [u32; 4] = [100, 500, 1000, 1500];

pub fn min_nineties_for_minutes(minutes: u32) -> f64 {
    f64::from(minutes) / 90.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct CohortFilter {
    pub league: String,
    /// Exposure threshold in 90-minute units.
    pub min_nineties: f64,
    pub squad: Option<String>,
    pub position: Option<Position>,
}

impl CohortFilter {
    pub fn new(league: impl Into<String>, min_minutes: u32) -> Self {
        Self {
            league: league.into(),
            min_nineties: min_nineties_for_minutes(min_minutes),
            squad: None,
            position: None,
        }
    }

    pub fn with_squad(mut self, squad: impl Into<String>) -> Self {
        let squad = squad.into();
        self.squad = if squad.trim().is_empty() { None } else { Some(squad) };
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    fn min_minutes(&self) -> u32 {
        (self.min_nineties * 90.0).round().max(0.0) as u32
    }
}

/// Peer group for one request. Row order carries no meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    pub season: String,
    pub league: String,
    pub records: Vec<StatRecord>,
}

impl Cohort {
    pub fn new(season: impl Into<String>, league: impl Into<String>, records: Vec<StatRecord>) -> Self {
        Self {
            season: season.into(),
            league: league.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First row for `player`.
    pub fn find_player(&self, player: &str) -> Option<&StatRecord> {
        self.records.iter().find(|r| r.player == player)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.records.iter().any(|r| r.stats.contains_key(column))
    }

    /// Finite values present for `column`; rows without one are left out.
    pub fn column_values(&self, column: &str) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|r| r.stat(column))
            .filter(|v| v.is_finite())
            .collect()
    }
}

/// Applies league, exposure, squad and position filters in that order.
pub fn filter_cohort(table: &SeasonTable, filter: &CohortFilter) -> Result<Cohort, PizzaError> {
    let exposed: Vec<&StatRecord> = table
        .records
        .iter()
        .filter(|r| r.league == filter.league)
        .filter(|r| r.nineties >= filter.min_nineties)
        .collect();
    log::debug!(
        "{} {}: {} players over {:.2} 90s",
        table.season,
        filter.league,
        exposed.len(),
        filter.min_nineties
    );
    if exposed.is_empty() {
        return Err(PizzaError::EmptyCohort {
            stage: FilterStage::Exposure,
            min_minutes: filter.min_minutes(),
        });
    }

    let selected: Vec<StatRecord> = exposed
        .into_iter()
        .filter(|r| filter.squad.as_deref().is_none_or(|squad| r.squad == squad))
        .filter(|r| filter.position.is_none_or(|pos| r.plays_position(pos)))
        .cloned()
        .collect();
    if selected.is_empty() {
        return Err(PizzaError::EmptyCohort {
            stage: FilterStage::Selection,
            min_minutes: filter.min_minutes(),
        });
    }

    Ok(Cohort::new(table.season.clone(), filter.league.clone(), selected))
}

/// Sorted, de-duplicated player names for the player picker.
pub fn selectable_players(cohort: &Cohort) -> Vec<String> {
    let set: BTreeSet<&str> = cohort.records.iter().map(|r| r.player.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}
