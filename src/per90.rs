use crate::cohort::Cohort;
use crate::stat_columns::PER_90_COLUMNS;

/// Divides every countable column by the row's `90s`.
///
/// Rows must have positive exposure; the minimum-minutes filter guarantees
/// that. Calling this twice on the same cohort divides twice.
pub fn normalize_per_90(mut cohort: Cohort, enabled: bool) -> Cohort {
    if !enabled {
        return cohort;
    }
    for record in &mut cohort.records {
        let nineties = record.nineties;
        for column in PER_90_COLUMNS {
            if let Some(value) = record.stats.get_mut(*column) {
                *value /= nineties;
            }
        }
    }
    cohort
}
