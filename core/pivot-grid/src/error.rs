//! FILENAME: core/pivot-grid/src/error.rs

use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Invalid cube data: {0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No cube data set on the active frame")]
    NoData,

    #[error("Column {column} is out of range ({data_columns} data columns)")]
    ColumnOutOfRange { column: usize, data_columns: usize },
}
