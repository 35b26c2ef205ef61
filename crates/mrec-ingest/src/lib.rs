//! Input loading for the matcher.
//!
//! Reads delimited files (CSV, TSV, ...) through Polars and spreadsheets
//! (`.xlsx`, `.xls`, `.ods`, ...) through calamine, and converts them into
//! [`mrec_model::Table`] values. The format follows the file extension. NaN-like sentinels and nulls become missing
//! cells; values that cannot be converted are stored as missing instead of
//! aborting the load.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use mrec_ingest::{LoadOptions, load_table};
//!
//! let base = load_table(Path::new("catalogue.csv"), &LoadOptions::default())?;
//! println!("{} rows, columns {:?}", base.len(), base.columns());
//! ```

mod convert;
mod csv;
mod error;
mod sheet;

use std::path::Path;
use std::time::Instant;

use mrec_model::Table;
use tracing::{debug, info_span};

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use convert::{any_to_cell, frame_to_table};
pub use csv::{
    LoadOptions, MAX_FILE_SIZE, check_file_size, parse_header_line, read_frame, read_header,
    validate_encoding,
};
pub use sheet::{
    SPREADSHEET_EXTENSIONS, data_to_cell, is_spreadsheet, read_sheet, read_sheet_header,
};

/// Loads a delimited file or the first sheet of a workbook into a table
/// named after the file stem.
pub fn load_table(path: &Path, options: &LoadOptions) -> Result<Table> {
    let _span = info_span!("load", path = %path.display()).entered();
    let start = Instant::now();

    check_file_size(path, options.max_file_size)?;
    let table = if is_spreadsheet(path) {
        read_sheet(table_name(path), path, options)?
    } else {
        validate_encoding(path)?;
        read_header(path, options.delimiter)?;
        let df = read_frame(path, options)?;
        frame_to_table(table_name(path), &df).map_err(|source| IngestError::Table {
            path: path.to_path_buf(),
            source,
        })?
    };

    debug!(
        rows = table.len(),
        columns = table.columns().len(),
        duration_ms = start.elapsed().as_millis(),
        "table loaded"
    );
    Ok(table)
}

/// Column names of an input file.
pub fn list_columns(path: &Path, options: &LoadOptions) -> Result<Vec<String>> {
    if is_spreadsheet(path) {
        return read_sheet_header(path);
    }
    validate_encoding(path)?;
    read_header(path, options.delimiter)
}

fn table_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
