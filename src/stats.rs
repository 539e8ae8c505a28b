use crate::error::StatsError;
use crate::store::RecordStore;
use crate::types::SummaryStats;
use crate::util::{average, round2, sample_std_dev};
use chrono::Datelike;
use indexmap::IndexMap;

/// Year-bucketed statistics over the whole store, computed once at startup.
pub fn compute_summary(store: &RecordStore) -> Result<SummaryStats, StatsError> {
    if store.is_empty() {
        return Err(StatsError::EmptyStore);
    }

    let mut per_year: IndexMap<i32, usize> = IndexMap::new();
    for r in store.records() {
        *per_year.entry(r.incident_datetime.year()).or_insert(0) += 1;
    }
    per_year.sort_keys();

    let counts: Vec<f64> = per_year.values().map(|c| *c as f64).collect();
    let max = per_year.values().copied().max().unwrap_or(0);
    let min = per_year.values().copied().min().unwrap_or(0);

    Ok(SummaryStats {
        total_accidents: store.len(),
        average_accidents_per_year: round2(average(&counts)),
        max_accidents_in_a_year: max,
        min_accidents_in_a_year: min,
        std_accidents_per_year: sample_std_dev(&counts).map(round2),
        accidents_per_year: per_year,
    })
}
