use thiserror::Error;

/// Errors raised while exporting a table
#[derive(Error, Debug)]
pub enum TableError {
    #[error(
        "Cell at row {row}, column `{column}` holds a temporal value; normalize the table before export"
    )]
    UnnormalizedTemporal { row: usize, column: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TableResult<T> = Result<T, TableError>;
