//! Error types for loading the launch dataset.
//!
//! Every failure here is fatal at startup: the dashboard never opens on a
//! dataset it could not read. Query-time problems (unknown site, inverted
//! payload range) are not errors and degrade to empty results instead.

use thiserror::Error;

/// Errors raised while reading a launch records file into a [`LaunchTable`].
///
/// [`LaunchTable`]: crate::data::model::LaunchTable
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File missing or unreadable.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited text.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed Parquet container.
    #[error("Invalid Parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Arrow batch could not be decoded.
    #[error("Invalid Arrow data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// File extension is not one of csv / json / parquet.
    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// A required column is absent from the header / schema.
    #[error("Missing required column: '{0}'")]
    MissingColumn(String),

    /// A cell could not be interpreted for its column.
    #[error("Row {row}, column '{column}' (value '{value}'): {message}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
        message: String,
    },

    /// The file parsed but contains no records.
    #[error("Dataset contains no launch records")]
    Empty,
}

impl DataLoadError {
    pub fn invalid_value(
        row: usize,
        column: &str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        DataLoadError::InvalidValue {
            row,
            column: column.to_string(),
            value: value.into(),
            message: message.into(),
        }
    }
}

/// Result type for dataset loading.
pub type LoadResult<T> = Result<T, DataLoadError>;
