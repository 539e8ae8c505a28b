use crate::dashboard::CHART_TITLES;
use crate::error::ExportError;
use crate::store::DateRange;
use crate::types::{DashboardViews, SummaryStats};
use crate::util::{format_int, format_number};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn preview_table<T>(chart_no: usize, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("\nChart {}: {}", chart_no, CHART_TITLES[chart_no - 1]);
    println!("({} rows)\n", format_int(rows.len()));
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

#[derive(Debug, Serialize)]
struct SummaryFile<'a> {
    #[serde(flatten)]
    stats: &'a SummaryStats,
    start_date: NaiveDate,
    end_date: NaiveDate,
    records_in_range: usize,
}

/// Write every view into `dir`. A failed file is logged and skipped; the
/// number of files written is returned.
pub fn export_views(
    dir: &Path,
    views: &DashboardViews,
    summary: &SummaryStats,
    range: &DateRange,
) -> Result<usize, ExportError> {
    std::fs::create_dir_all(dir)?;

    let summary_file = SummaryFile {
        stats: summary,
        start_date: range.start,
        end_date: range.end,
        records_in_range: views.parallel_coordinates.rows.len(),
    };

    let results = [
        ("chart01_fatalities_by_month.csv", write_csv(&dir.join("chart01_fatalities_by_month.csv"), &views.fatalities_by_month)),
        ("chart02_accidents_by_month.csv", write_csv(&dir.join("chart02_accidents_by_month.csv"), &views.accidents_by_month)),
        ("chart03_geo_points.csv", write_csv(&dir.join("chart03_geo_points.csv"), &views.geo_points)),
        ("chart04_accident_types.csv", write_csv(&dir.join("chart04_accident_types.csv"), &views.accident_types)),
        ("chart05_injuries_stacked.csv", write_csv(&dir.join("chart05_injuries_stacked.csv"), &views.injuries_stacked)),
        ("chart06_flow_graph.json", write_json(&dir.join("chart06_flow_graph.json"), &views.flow_graph)),
        ("chart07_parallel_coordinates.csv", write_csv(&dir.join("chart07_parallel_coordinates.csv"), &views.parallel_coordinates.rows)),
        ("chart08_vehicle_types.csv", write_csv(&dir.join("chart08_vehicle_types.csv"), &views.vehicle_types)),
        ("chart09_weather_by_month.csv", write_csv(&dir.join("chart09_weather_by_month.csv"), &views.weather_by_month)),
        ("chart10_scatter_matrix.json", write_json(&dir.join("chart10_scatter_matrix.json"), &views.scatter_matrix)),
        ("summary.json", write_json(&dir.join("summary.json"), &summary_file)),
    ];

    let mut written = 0usize;
    for (file, result) in results {
        match result {
            Ok(()) => {
                log::debug!("Wrote {}", dir.join(file).display());
                written += 1;
            }
            Err(e) => log::warn!("Failed to write {file}: {e}"),
        }
    }
    Ok(written)
}

/// Terminal rendering of the summary cards.
pub fn print_summary(summary: &SummaryStats) {
    let std = summary
        .std_accidents_per_year
        .map(|s| format_number(s, 2))
        .unwrap_or_else(|| "n/a".to_string());
    println!("Total Accidents:         {}", format_int(summary.total_accidents));
    println!("Avg Accidents/Year:      {}", format_number(summary.average_accidents_per_year, 2));
    println!("Max Accidents in a Year: {}", format_int(summary.max_accidents_in_a_year));
    println!("Min Accidents in a Year: {}", format_int(summary.min_accidents_in_a_year));
    println!("Std Dev Accidents/Year:  {}\n", std);
}

/// Preview every tabular view and describe the two structured ones.
pub fn preview_views(views: &DashboardViews, max_rows: usize) {
    preview_table(1, &views.fatalities_by_month, max_rows);
    preview_table(2, &views.accidents_by_month, max_rows);
    preview_table(3, &views.geo_points, max_rows);
    preview_table(4, &views.accident_types, max_rows);
    preview_table(5, &views.injuries_stacked, max_rows);
    println!("\nChart 6: {}", CHART_TITLES[5]);
    println!(
        "({} nodes, {} edges)\n",
        format_int(views.flow_graph.labels.len()),
        format_int(views.flow_graph.edges.len())
    );
    preview_table(7, &views.parallel_coordinates.rows, max_rows);
    preview_table(8, &views.vehicle_types, max_rows);
    preview_table(9, &views.weather_by_month, max_rows);
    println!("\nChart 10: {}", CHART_TITLES[9]);
    match &views.scatter_matrix {
        crate::types::ScatterMatrix::Matrix { columns, rows } => {
            println!("({} rows over {})\n", format_int(rows.len()), columns.join(", "))
        }
        crate::types::ScatterMatrix::Empty { title } => println!("({})\n", title),
    }
}
