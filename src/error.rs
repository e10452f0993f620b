use std::path::PathBuf;
use thiserror::Error;

/// Fatal startup errors: a malformed source file means no dashboard.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to open CSV file {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV records")]
    Csv(#[from] csv::Error),

    #[error("required column '{0}' not found in CSV header")]
    MissingColumn(String),

    #[error("non-numeric year '{value}' in row {row} ({country})")]
    BadYear {
        row: usize,
        country: String,
        value: String,
    },

    #[error("no rows survived cleaning (check column names and min_year)")]
    Empty,
}

/// Recoverable: a UI-supplied parameter outside the known domain.
/// Bindings fall back to a default instead of surfacing these to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("year {0} is not present in the dataset")]
    UnknownYear(i32),

    #[error("country '{0}' is not present in the dataset")]
    UnknownCountry(String),
}
