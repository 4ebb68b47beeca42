use chrono::NaiveDate;
use thiserror::Error;
use tracing::error;

/// Error types for the dataset module
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Input file or directory absent, empty, or not a regular file
    #[error("data source unavailable: {0}")]
    MissingSource(String),

    /// A mandatory semantic role could not be resolved to a column
    #[error("expected columns {missing:?} were not found; columns present: {available:?}")]
    MissingColumn {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// A valid filter combination matched zero rows
    #[error("no rows match the current selection")]
    EmptySelection,

    /// Caller supplied a range whose end precedes its start
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Error from CSV parsing
    #[error("CSV parse error: {0}")]
    Parse(String),

    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    Frame(String),

    /// Error from filesystem access
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<polars::error::PolarsError> for DatasetError {
    fn from(error: polars::error::PolarsError) -> Self {
        let dataset_error = match error {
            polars::error::PolarsError::NoData(_) => {
                let err = DatasetError::Parse(format!("No data: {}", error));
                error!(?err, "CSV error: No data");
                err
            }
            polars::error::PolarsError::SchemaMismatch(_) => {
                let err = DatasetError::Parse(format!("Schema mismatch: {}", error));
                error!(?err, "CSV error: Schema mismatch");
                err
            }
            polars::error::PolarsError::ColumnNotFound(_) => {
                let err = DatasetError::Frame(format!("Column not found: {}", error));
                error!(?err, "DataFrame error: Column not found");
                err
            }
            polars::error::PolarsError::ComputeError(_) => {
                let err = DatasetError::Frame(format!("Compute error: {}", error));
                error!(?err, "DataFrame error: Compute error");
                err
            }
            polars::error::PolarsError::OutOfBounds(_) => {
                let err = DatasetError::Frame(format!("Out of bounds: {}", error));
                error!(?err, "DataFrame error: Out of bounds");
                err
            }
            _ => {
                let err = DatasetError::Frame(format!("{}", error));
                error!(?err, "DataFrame error");
                err
            }
        };
        dataset_error
    }
}

/// Type alias for Result with DatasetError
pub type Result<T> = std::result::Result<T, DatasetError>;
