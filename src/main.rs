// Entry point and command-line flow.
//
// The incident CSV is loaded once into a process-wide cell, the summary
// statistics are computed from it, and then the ten chart views are
// rebuilt for each requested date range:
// - a single pass by default, using `--start`/`--end` or the data bounds;
// - with `--interactive`, a menu loop that loads the file on `[1]` and asks
//   for a date range on every `[2]`, standing in for the dashboard's picker.
mod dashboard;
mod error;
mod flow;
mod loader;
mod months;
mod normalize;
mod output;
mod reports;
mod stats;
mod store;
mod types;
mod util;

#[cfg(test)]
mod fixtures;

use chrono::NaiveDate;
use clap::Parser;
use dashboard::Dashboard;
use error::DashboardError;
use once_cell::sync::OnceCell;
use reports::{NumericColumn, SCATTER_COLUMNS};
use std::io::{self, Write};
use std::path::PathBuf;
use store::{DateRange, RecordStore};
use types::SummaryStats;

// Loaded once; every recompute only borrows it.
static STORE: OnceCell<RecordStore> = OnceCell::new();
static SUMMARY: OnceCell<SummaryStats> = OnceCell::new();

#[derive(Parser, Debug)]
#[command(name = "accident_dashboard", about = "Accident dashboard data pipeline")]
struct Cli {
    /// Incident CSV to load
    #[arg(long, env = "ACCIDENT_CSV", default_value = "accident2019_2025.csv")]
    input: PathBuf,

    /// Directory the chart views are written to
    #[arg(long, env = "ACCIDENT_OUT_DIR", default_value = "dashboard_output")]
    out_dir: PathBuf,

    /// First incident date to include (YYYY-MM-DD); defaults to the earliest
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last incident date to include (YYYY-MM-DD); defaults to the latest
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Numeric column for the scatter matrix (repeat the flag for each)
    #[arg(long = "scatter-column", value_enum, default_values_t = SCATTER_COLUMNS)]
    scatter_columns: Vec<NumericColumn>,

    /// Rows shown per table preview
    #[arg(long, default_value_t = 3)]
    preview_rows: usize,

    /// Run the menu loop instead of a single pass
    #[arg(long)]
    interactive: bool,
}

/// Load the CSV and compute the summary statistics. Both failure classes
/// abort before any view is served.
fn load(cli: &Cli) -> Result<(), DashboardError> {
    if STORE.get().is_some() {
        return Err(DashboardError::AlreadyLoaded);
    }
    let path = cli.input.to_string_lossy();
    log::info!("Loading {path}");
    let (store, report) = loader::load_records(&path)?;
    let summary = stats::compute_summary(&store)?;

    println!(
        "Processing dataset... ({} rows loaded)",
        util::format_int(report.total_rows)
    );
    if report.missing_coords > 0 {
        println!(
            "Note: {} rows have no coordinates and are left off the map.",
            util::format_int(report.missing_coords)
        );
    }
    if report.missing_categories > 0 {
        log::info!(
            "{} rows have at least one blank category",
            report.missing_categories
        );
    }
    println!();
    output::print_summary(&summary);

    STORE.set(store).map_err(|_| DashboardError::AlreadyLoaded)?;
    SUMMARY.set(summary).map_err(|_| DashboardError::AlreadyLoaded)?;
    Ok(())
}

/// Recompute, preview and export the views for one date range.
fn generate(cli: &Cli, start: Option<NaiveDate>, end: Option<NaiveDate>) {
    let (Some(store), Some(summary)) = (STORE.get(), SUMMARY.get()) else {
        println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
        return;
    };
    let dash = Dashboard::new(store).with_scatter_columns(&cli.scatter_columns);
    let Some(bounds) = dash.default_range() else {
        println!("Error: the dataset has no incidents.\n");
        return;
    };
    let range = DateRange::new(start.unwrap_or(bounds.start), end.unwrap_or(bounds.end));

    println!("Generating dashboard views for {} to {}...", range.start, range.end);
    let views = dash.recompute(range.start, range.end);
    output::preview_views(&views, cli.preview_rows);

    match output::export_views(&cli.out_dir, &views, summary, &range) {
        Ok(written) => println!(
            "({} files exported to {})\n",
            written,
            cli.out_dir.display()
        ),
        Err(e) => eprintln!("Write error: {}", e),
    }
}

fn read_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Parse `"YYYY-MM-DD YYYY-MM-DD"`; an empty answer keeps the data bounds.
fn parse_range(input: &str) -> Option<(Option<NaiveDate>, Option<NaiveDate>)> {
    let mut parts = input.split_whitespace();
    let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
        return input.is_empty().then_some((None, None));
    };
    let start = NaiveDate::parse_from_str(a, "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(b, "%Y-%m-%d").ok()?;
    Some((Some(start), Some(end)))
}

fn prompt_back_to_menu() -> bool {
    loop {
        match read_line("Back to Range Selection (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn run_interactive(cli: &Cli) {
    loop {
        println!("Accident Dashboard:");
        println!("[1] Load the file");
        println!("[2] Generate Dashboard Views\n");
        match read_line("Enter choice: ").as_str() {
            "1" => {
                if let Err(e) = load(cli) {
                    eprintln!("Failed to load file: {}\n", e);
                }
            }
            "2" => {
                let answer = read_line("Date range (YYYY-MM-DD YYYY-MM-DD, blank for all): ");
                let Some((start, end)) = parse_range(&answer) else {
                    println!("Invalid date range.\n");
                    continue;
                };
                println!();
                generate(cli, start, end);
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => println!("Invalid choice. Please enter 1 or 2.\n"),
        }
    }
}

fn main() -> Result<(), DashboardError> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    if cli.interactive {
        run_interactive(&cli);
        return Ok(());
    }

    load(&cli)?;
    generate(&cli, cli.start, cli.end);
    Ok(())
}
