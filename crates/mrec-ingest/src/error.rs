//! Error types for table loading.

use std::path::PathBuf;

use mrec_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading an input table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, above the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Only UTF-8 input is supported.
    #[error("unsupported encoding {encoding} in {path}; save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// Failed to parse the file with Polars.
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// File has no header line.
    #[error("input file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header line has no usable column names.
    #[error("could not read a header row from {path}")]
    NoHeaderDetected { path: PathBuf },

    /// A header cell is blank.
    #[error("blank column name at position {position} in {path}")]
    EmptyColumnName { path: PathBuf, position: usize },

    /// The workbook could not be opened or its sheet read.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// The workbook has no worksheet.
    #[error("workbook {path} has no worksheet")]
    NoWorksheet { path: PathBuf },

    // === Conversion Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// The loaded data does not form a valid table.
    #[error("invalid table in {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, IngestError>;
