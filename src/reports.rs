// The chart recipes.
//
// Each function turns a working set into the exact row shape one chart
// needs. None of them look at anything but their argument, so running one
// twice on the same input gives identical output.
use crate::months::{sort_by_month, MonthBucket};
use crate::normalize::{vehicle_color, CategoryNormalizer};
use crate::store::WorkingSet;
use crate::types::{
    CasualtyRow, CategoryCountRow, GeoPointRow, MonthlyCountRow, MonthlyFatalitiesRow,
    MonthlyInjuriesRow, ParallelCoordinates, ScatterMatrix, WeatherMonthRow,
};
use crate::util::average;
use indexmap::IndexMap;
use std::collections::BTreeMap;

pub const SCATTER_PLACEHOLDER_TITLE: &str = "Not enough data for Scatter Matrix";

/// Numeric incident columns available to the scatter matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NumericColumn {
    Injuries,
    Fatalities,
    VehiclesInvolved,
}

impl NumericColumn {
    pub fn name(&self) -> &'static str {
        match self {
            NumericColumn::Injuries => "number_of_injuries",
            NumericColumn::Fatalities => "number_of_fatalities",
            NumericColumn::VehiclesInvolved => "number_of_vehicles_involved",
        }
    }
}

/// Columns used by the dashboard's scatter matrix.
pub const SCATTER_COLUMNS: [NumericColumn; 2] = [NumericColumn::Injuries, NumericColumn::Fatalities];

/// Occurrence counts of the present values, most frequent first. Equal
/// counts keep first-occurrence order.
pub fn value_counts<'a, I>(values: I) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for v in values.into_iter().flatten() {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Chart 1: fatalities per (month, vehicle type).
pub fn fatalities_by_month(ws: &WorkingSet) -> Vec<MonthlyFatalitiesRow> {
    let mut sums: BTreeMap<(MonthBucket, &str), u64> = BTreeMap::new();
    for row in &ws.rows {
        if let Some(vt) = row.record.vehicle_type.as_deref() {
            *sums.entry((row.month, vt)).or_insert(0) += u64::from(row.record.fatalities);
        }
    }
    sums.into_iter()
        .map(|((month, vt), fatalities)| MonthlyFatalitiesRow {
            month,
            vehicle_type: vt.to_string(),
            fatalities,
        })
        .collect()
}

/// Chart 2: accidents per month.
pub fn accidents_by_month(ws: &WorkingSet) -> Vec<MonthlyCountRow> {
    let mut counts: BTreeMap<MonthBucket, usize> = BTreeMap::new();
    for row in &ws.rows {
        *counts.entry(row.month).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(month, count)| MonthlyCountRow { month, count })
        .collect()
}

/// Chart 3: one map point per located incident.
pub fn geo_points(ws: &WorkingSet, normalizer: &CategoryNormalizer) -> Vec<GeoPointRow> {
    ws.records()
        .filter_map(|r| {
            let (latitude, longitude) = (r.latitude?, r.longitude?);
            let simplified = normalizer.simplify(r.vehicle_type.as_deref());
            Some(GeoPointRow {
                latitude,
                longitude,
                vehicle_type_simplified: simplified.to_string(),
                province: r.province.clone().unwrap_or_default(),
                color: vehicle_color(simplified).to_string(),
            })
        })
        .collect()
}

/// Chart 4: accidents per accident type.
pub fn accident_types(ws: &WorkingSet) -> Vec<CategoryCountRow> {
    to_category_rows(value_counts(ws.records().map(|r| r.accident_type.as_deref())))
}

/// Chart 5: injuries per (month, vehicle type), ascending by total within
/// each month.
pub fn injuries_stacked(ws: &WorkingSet) -> Vec<MonthlyInjuriesRow> {
    let mut sums: BTreeMap<(MonthBucket, &str), u64> = BTreeMap::new();
    for row in &ws.rows {
        if let Some(vt) = row.record.vehicle_type.as_deref() {
            *sums.entry((row.month, vt)).or_insert(0) += u64::from(row.record.injuries);
        }
    }
    let mut rows: Vec<MonthlyInjuriesRow> = sums
        .into_iter()
        .map(|((month, vt), injuries)| MonthlyInjuriesRow {
            month,
            vehicle_type: vt.to_string(),
            injuries,
        })
        .collect();
    rows.sort_by_key(|r| r.injuries);
    sort_by_month(&mut rows, |r| r.month);
    rows
}

/// Chart 7: casualty counts per incident plus the colour midpoint.
pub fn parallel_coordinates(ws: &WorkingSet) -> ParallelCoordinates {
    let rows: Vec<CasualtyRow> = ws
        .records()
        .map(|r| CasualtyRow {
            injuries: r.injuries,
            fatalities: r.fatalities,
            vehicles_involved: r.vehicles_involved,
        })
        .collect();
    let color_midpoint = if rows.is_empty() {
        None
    } else {
        let injuries: Vec<f64> = rows.iter().map(|r| f64::from(r.injuries)).collect();
        Some(average(&injuries))
    };
    ParallelCoordinates { rows, color_midpoint }
}

/// Chart 8: accidents per vehicle type.
pub fn vehicle_types(ws: &WorkingSet) -> Vec<CategoryCountRow> {
    to_category_rows(value_counts(ws.records().map(|r| r.vehicle_type.as_deref())))
}

/// Chart 9: accidents per (weather condition, month), month-major.
pub fn weather_by_month(ws: &WorkingSet) -> Vec<WeatherMonthRow> {
    let mut counts: BTreeMap<(MonthBucket, &str), usize> = BTreeMap::new();
    for row in &ws.rows {
        if let Some(w) = row.record.weather_condition.as_deref() {
            *counts.entry((row.month, w)).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|((month, w), count)| WeatherMonthRow {
            weather_condition: w.to_string(),
            month,
            count,
        })
        .collect()
}

/// Chart 10: numeric columns for a scatter matrix. Fewer than two columns
/// or no rows yields the placeholder instead.
pub fn scatter_matrix(ws: &WorkingSet, columns: &[NumericColumn]) -> ScatterMatrix {
    if columns.len() < 2 || ws.is_empty() {
        return ScatterMatrix::Empty {
            title: SCATTER_PLACEHOLDER_TITLE.to_string(),
        };
    }
    let rows = ws
        .records()
        .map(|r| {
            columns
                .iter()
                .map(|c| match c {
                    NumericColumn::Injuries => r.injuries,
                    NumericColumn::Fatalities => r.fatalities,
                    NumericColumn::VehiclesInvolved => r.vehicles_involved,
                })
                .collect()
        })
        .collect();
    ScatterMatrix::Matrix {
        columns: columns.iter().map(|c| c.name().to_string()).collect(),
        rows,
    }
}

// `value_counts` already fixed the order; this only takes ownership of the
// labels for the output rows.
fn to_category_rows(counts: Vec<(&str, usize)>) -> Vec<CategoryCountRow> {
    counts
        .into_iter()
        .map(|(category, count)| CategoryCountRow {
            category: category.to_string(),
            count,
        })
        .collect()
}
