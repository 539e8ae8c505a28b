use thiserror::Error;

/// Errors that abort loading the incident CSV.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required field was missing or could not be parsed.
    #[error("row {row}: invalid {column} value {value:?}")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Precondition failures of the global statistics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("cannot compute statistics over an empty record store")]
    EmptyStore,
}

/// Anything that stops the dashboard before it serves a view.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error("record store already loaded")]
    AlreadyLoaded,
}

/// Failures while writing a view to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
