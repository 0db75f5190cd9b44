use serde::Serialize;

use crate::cohort::{CohortFilter, filter_cohort, selectable_players};
use crate::config::PizzaConfig;
use crate::dataset::SeasonTable;
use crate::error::PizzaError;
use crate::per90::normalize_per_90;
use crate::percentile::{PercentileResult, compute_percentiles_with, resolve_columns};
use crate::presentation::{PizzaSlice, chart_caption, chart_title, pizza_slices};
use crate::stat_columns::{Position, position_profile};

/// Everything a user picks for one chart. Passed explicitly; nothing global.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PizzaRequest {
    pub season: String,
    pub league: String,
    pub position: Position,
    pub min_minutes: u32,
    pub squad: Option<String>,
    pub player: String,
    pub per_90: bool,
}

impl PizzaRequest {
    /// Filter backing the player picker: squad and position applied.
    pub fn selection_filter(&self) -> CohortFilter {
        let filter = CohortFilter::new(&self.league, self.min_minutes).with_position(self.position);
        match &self.squad {
            Some(squad) => filter.with_squad(squad),
            None => filter,
        }
    }

    /// Filter for the comparison group: every player of the position in the
    /// league, whatever their squad.
    pub fn comparison_filter(&self) -> CohortFilter {
        CohortFilter::new(&self.league, self.min_minutes).with_position(self.position)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PizzaReport {
    pub request: PizzaRequest,
    pub cohort_size: usize,
    pub minutes_played: u32,
    pub results: Vec<PercentileResult>,
    pub slices: Vec<PizzaSlice>,
    pub title: String,
    pub caption: String,
}

/// Players offered for `request`'s season, league, squad and position.
pub fn players_for_request(
    table: &SeasonTable,
    request: &PizzaRequest,
) -> Result<Vec<String>, PizzaError> {
    let selection = filter_cohort(table, &request.selection_filter())?;
    Ok(selectable_players(&selection))
}

/// Runs one request from the raw season table to renderer-ready slices.
pub fn run_pizza(
    table: &SeasonTable,
    request: &PizzaRequest,
    config: &PizzaConfig,
) -> Result<PizzaReport, PizzaError> {
    let players = players_for_request(table, request)?;
    if !players.iter().any(|p| *p == request.player) {
        return Err(PizzaError::PlayerNotFound(request.player.clone()));
    }

    let comparison = filter_cohort(table, &request.comparison_filter())?;
    let minutes_played = comparison
        .find_player(&request.player)
        .map(|r| r.minutes_played())
        .ok_or_else(|| PizzaError::PlayerNotFound(request.player.clone()))?;

    let cohort = normalize_per_90(comparison, request.per_90);
    let columns = resolve_columns(&cohort, &position_profile(request.position));
    let results =
        compute_percentiles_with(&cohort, &request.player, &columns, config.percentile_kind)?;
    log::debug!(
        "{}: {} columns against {} peers",
        request.player,
        results.len(),
        cohort.len()
    );

    let slices = pizza_slices(&results, config.label_style);
    let title = chart_title(&request.player, &request.league, request.position, minutes_played);
    let caption = chart_caption(
        request.position,
        &request.league,
        &request.season,
        request.min_minutes,
    );

    Ok(PizzaReport {
        request: request.clone(),
        cohort_size: cohort.len(),
        minutes_played,
        results,
        slices,
        title,
        caption,
    })
}
