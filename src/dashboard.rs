// Recompute entry point, called whenever the date range changes.
use crate::flow::flow_graph;
use crate::normalize::CategoryNormalizer;
use crate::reports::{self, NumericColumn, SCATTER_COLUMNS};
use crate::store::{DateRange, RecordStore};
use crate::types::{DashboardViews, ScatterMatrix};
use chrono::NaiveDate;

/// Chart titles, in the order the views are returned.
pub const CHART_TITLES: [&str; 10] = [
    "Fatalities By Month (Line Chart)",
    "Accidents by Month (Bar Chart)",
    "Geographical Scatter Plot",
    "Accidents by Type (Pie Chart)",
    "Injuries by Month and Vehicle Type (Stacked Bar Chart)",
    "Vehicle Type / Presumed Cause / Accident Type / Road Type (Sankey Diagram)",
    "Injuries, Fatalities and Vehicles Involved (Parallel Coordinates)",
    "Accidents by Vehicle Type (Donut Chart)",
    "Accidents by Month and Weather (Grouped Bar Chart)",
    "Scatter Matrix of Numeric Columns",
];

pub struct Dashboard<'s> {
    store: &'s RecordStore,
    normalizer: CategoryNormalizer,
    scatter_columns: Vec<NumericColumn>,
}

impl<'s> Dashboard<'s> {
    pub fn new(store: &'s RecordStore) -> Self {
        Dashboard {
            store,
            normalizer: CategoryNormalizer::vehicle_types(),
            scatter_columns: SCATTER_COLUMNS.to_vec(),
        }
    }

    pub fn with_scatter_columns(mut self, columns: &[NumericColumn]) -> Self {
        self.scatter_columns = columns.to_vec();
        self
    }

    /// The full span of the data, used when the control has no selection.
    pub fn default_range(&self) -> Option<DateRange> {
        self.store.date_bounds()
    }

    /// Rebuild all ten views for incidents dated within `start..=end`.
    pub fn recompute(&self, start: NaiveDate, end: NaiveDate) -> DashboardViews {
        let range = DateRange::new(start, end);
        let ws = self.store.working_set(&range);
        log::info!(
            "Recomputing views for {start}..={end} ({} of {} records)",
            ws.len(),
            self.store.len()
        );

        let views = DashboardViews {
            fatalities_by_month: reports::fatalities_by_month(&ws),
            accidents_by_month: reports::accidents_by_month(&ws),
            geo_points: reports::geo_points(&ws, &self.normalizer),
            accident_types: reports::accident_types(&ws),
            injuries_stacked: reports::injuries_stacked(&ws),
            flow_graph: flow_graph(&ws),
            parallel_coordinates: reports::parallel_coordinates(&ws),
            vehicle_types: reports::vehicle_types(&ws),
            weather_by_month: reports::weather_by_month(&ws),
            scatter_matrix: reports::scatter_matrix(&ws, &self.scatter_columns),
        };

        if let ScatterMatrix::Empty { title } = &views.scatter_matrix {
            log::warn!("Scatter matrix unavailable: {title}");
        }
        for (title, size) in CHART_TITLES.iter().zip(views.sizes()) {
            log::debug!("{title}: {size} rows");
        }
        views
    }
}

impl DashboardViews {
    /// Row (or edge) count of each view, in chart order.
    pub fn sizes(&self) -> [usize; 10] {
        let scatter = match &self.scatter_matrix {
            ScatterMatrix::Matrix { rows, .. } => rows.len(),
            ScatterMatrix::Empty { .. } => 0,
        };
        [
            self.fatalities_by_month.len(),
            self.accidents_by_month.len(),
            self.geo_points.len(),
            self.accident_types.len(),
            self.injuries_stacked.len(),
            self.flow_graph.edges.len(),
            self.parallel_coordinates.rows.len(),
            self.vehicle_types.len(),
            self.weather_by_month.len(),
            scatter,
        ]
    }
}
