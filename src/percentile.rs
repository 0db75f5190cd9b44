use serde::{Deserialize, Serialize};

use crate::cohort::Cohort;
use crate::error::{FilterStage, PizzaError};
use crate::stat_columns::{ColumnSpec, Direction};

/// How ties and the score itself count towards a percentile-of-score.
///
/// With `left = #(x < v)`, `right = #(x <= v)` and `n` values:
/// - `Rank`: `(left + right + [right > left]) * 50 / n`, the average of the
///   tied positions counted from one. The score's own row always counts, so
///   the cohort maximum lands on 100.
/// - `Weak`: `right * 100 / n`.
/// - `Strict`: `left * 100 / n`.
/// - `Mean`: `(left + right) * 50 / n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PercentileKind {
    #[default]
    Rank,
    Weak,
    Strict,
    Mean,
}

impl PercentileKind {
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rank" => Some(PercentileKind::Rank),
            "weak" => Some(PercentileKind::Weak),
            "strict" => Some(PercentileKind::Strict),
            "mean" => Some(PercentileKind::Mean),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileResult {
    pub column: ColumnSpec,
    pub raw_value: f64,
    /// Already flipped for lower-is-better columns.
    pub percentile: u8,
    /// 1 is best.
    pub rank: u32,
}

/// Percentile of `score` within `sample`, in [0, 100]. `None` for an empty
/// sample.
pub fn percentile_of_score(sample: &[f64], score: f64, kind: PercentileKind) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    let n = sample.len() as f64;
    let left = sample.iter().filter(|x| **x < score).count();
    let right = sample.iter().filter(|x| **x <= score).count();
    let pct = match kind {
        PercentileKind::Rank => {
            let own = usize::from(right > left);
            (left + right + own) as f64 * 50.0 / n
        }
        PercentileKind::Weak => right as f64 * 100.0 / n,
        PercentileKind::Strict => left as f64 * 100.0 / n,
        PercentileKind::Mean => (left + right) as f64 * 50.0 / n,
    };
    Some(pct)
}

/// Average rank of `score` with ties sharing the mean of their positions.
/// Higher values rank first for `HigherBetter`, lower values for `LowerBetter`.
pub fn average_rank(sample: &[f64], score: f64, direction: Direction) -> f64 {
    let better = sample
        .iter()
        .filter(|x| match direction {
            Direction::HigherBetter => **x > score,
            Direction::LowerBetter => **x < score,
        })
        .count();
    let tied = sample.iter().filter(|x| **x == score).count();
    better as f64 + (tied as f64 + 1.0) / 2.0
}

/// Percentile, raw value and rank of `player` for each column, in column order,
/// using the default [`PercentileKind`].
pub fn compute_percentiles(
    cohort: &Cohort,
    player: &str,
    columns: &[ColumnSpec],
) -> Result<Vec<PercentileResult>, PizzaError> {
    compute_percentiles_with(cohort, player, columns, PercentileKind::default())
}

pub fn compute_percentiles_with(
    cohort: &Cohort,
    player: &str,
    columns: &[ColumnSpec],
    kind: PercentileKind,
) -> Result<Vec<PercentileResult>, PizzaError> {
    if cohort.is_empty() {
        return Err(PizzaError::EmptyCohort {
            stage: FilterStage::Selection,
            min_minutes: 0,
        });
    }
    let record = cohort
        .find_player(player)
        .ok_or_else(|| PizzaError::PlayerNotFound(player.to_string()))?;

    let mut out = Vec::with_capacity(columns.len());
    for column in columns {
        let value = record
            .stat(&column.name)
            .filter(|v| v.is_finite())
            .ok_or_else(|| PizzaError::MissingColumn {
                player: player.to_string(),
                column: column.name.clone(),
            })?;
        let sample = cohort.column_values(&column.name);
        // The player's own value is always part of the sample.
        let pct = percentile_of_score(&sample, value, kind).unwrap_or(0.0);
        let pct = pct.floor().clamp(0.0, 100.0) as u8;
        let percentile = match column.direction {
            Direction::HigherBetter => pct,
            Direction::LowerBetter => 100 - pct,
        };
        let rank = average_rank(&sample, value, column.direction).max(1.0) as u32;
        out.push(PercentileResult {
            column: column.clone(),
            raw_value: value,
            percentile,
            rank,
        });
    }
    Ok(out)
}

/// Keeps the profile columns the cohort actually carries, in profile order.
/// Column sets vary by season export, so unknown columns are skipped.
pub fn resolve_columns(cohort: &Cohort, profile: &[ColumnSpec]) -> Vec<ColumnSpec> {
    profile
        .iter()
        .filter(|column| {
            let known = cohort.has_column(&column.name);
            if !known {
                log::warn!("column {} not in {} data, skipped", column.name, cohort.season);
            }
            known
        })
        .cloned()
        .collect()
}
