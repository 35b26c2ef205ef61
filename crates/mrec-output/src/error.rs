//! Error types for report export.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The format could not be derived from the output path.
    #[error("cannot infer an output format from {path}; use a .csv or .xlsx extension")]
    UnknownFormat { path: PathBuf },

    /// XLSX sheets hold at most 1,048,576 rows and 16,384 columns.
    #[error("table of {rows} rows and {columns} columns does not fit in a worksheet")]
    SheetTooLarge { rows: usize, columns: usize },
}

pub type Result<T> = std::result::Result<T, OutputError>;
