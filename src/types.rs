use crate::months::MonthBucket;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Deserialize)]
pub struct RawRow {
    pub incident_datetime: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub province_th: Option<String>,
    pub vehicle_type: Option<String>,
    pub presumed_cause: Option<String>,
    pub accident_type: Option<String>,
    pub road_description: Option<String>,
    pub weather_condition: Option<String>,
    pub number_of_injuries: Option<String>,
    pub number_of_fatalities: Option<String>,
    pub number_of_vehicles_involved: Option<String>,
}

/// One accident, as loaded. Blank categorical cells are `None` and never
/// form a group of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRecord {
    pub incident_datetime: NaiveDateTime,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub province: Option<String>,
    pub vehicle_type: Option<String>,
    pub presumed_cause: Option<String>,
    pub accident_type: Option<String>,
    pub road_description: Option<String>,
    pub weather_condition: Option<String>,
    pub injuries: u32,
    pub fatalities: u32,
    pub vehicles_involved: u32,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct MonthlyFatalitiesRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: MonthBucket,
    #[serde(rename = "vehicle_type")]
    #[tabled(rename = "vehicle_type")]
    pub vehicle_type: String,
    #[serde(rename = "number_of_fatalities")]
    #[tabled(rename = "number_of_fatalities")]
    pub fatalities: u64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct MonthlyCountRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: MonthBucket,
    #[serde(rename = "count")]
    #[tabled(rename = "count")]
    pub count: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct GeoPointRow {
    pub latitude: f64,
    pub longitude: f64,
    pub vehicle_type_simplified: String,
    #[serde(rename = "province_th")]
    #[tabled(rename = "province_th")]
    pub province: String,
    pub color: String,
}

/// A `(category, count)` pair for pie and donut charts.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CategoryCountRow {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct MonthlyInjuriesRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: MonthBucket,
    #[serde(rename = "vehicle_type")]
    #[tabled(rename = "vehicle_type")]
    pub vehicle_type: String,
    #[serde(rename = "number_of_injuries")]
    #[tabled(rename = "number_of_injuries")]
    pub injuries: u64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CasualtyRow {
    #[serde(rename = "number_of_injuries")]
    #[tabled(rename = "number_of_injuries")]
    pub injuries: u32,
    #[serde(rename = "number_of_fatalities")]
    #[tabled(rename = "number_of_fatalities")]
    pub fatalities: u32,
    #[serde(rename = "number_of_vehicles_involved")]
    #[tabled(rename = "number_of_vehicles_involved")]
    pub vehicles_involved: u32,
}

/// Rows for the parallel-coordinates chart plus the colour-scale midpoint
/// (mean injuries); `None` when there are no rows.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ParallelCoordinates {
    pub rows: Vec<CasualtyRow>,
    pub color_midpoint: Option<f64>,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct WeatherMonthRow {
    pub weather_condition: String,
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: MonthBucket,
    pub count: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, Copy, PartialEq, Eq)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub value: usize,
}

/// Node labels and weighted edges for the Sankey diagram.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct FlowGraph {
    pub labels: Vec<String>,
    pub edges: Vec<FlowEdge>,
}

/// Scatter-matrix input, or the placeholder shown when the selection cannot
/// support one.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScatterMatrix {
    Matrix {
        columns: Vec<String>,
        rows: Vec<Vec<u32>>,
    },
    Empty {
        title: String,
    },
}

/// The ten chart datasets, in presentation order.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DashboardViews {
    pub fatalities_by_month: Vec<MonthlyFatalitiesRow>,
    pub accidents_by_month: Vec<MonthlyCountRow>,
    pub geo_points: Vec<GeoPointRow>,
    pub accident_types: Vec<CategoryCountRow>,
    pub injuries_stacked: Vec<MonthlyInjuriesRow>,
    pub flow_graph: FlowGraph,
    pub parallel_coordinates: ParallelCoordinates,
    pub vehicle_types: Vec<CategoryCountRow>,
    pub weather_by_month: Vec<WeatherMonthRow>,
    pub scatter_matrix: ScatterMatrix,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_accidents: usize,
    pub average_accidents_per_year: f64,
    pub max_accidents_in_a_year: usize,
    pub min_accidents_in_a_year: usize,
    /// Sample standard deviation; undefined with fewer than two years.
    pub std_accidents_per_year: Option<f64>,
    pub accidents_per_year: IndexMap<i32, usize>,
}
