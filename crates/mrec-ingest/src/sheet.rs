//! Spreadsheet reading through calamine.
//!
//! The first worksheet is read; its first row holds the column names.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use mrec_model::{CellValue, Table};

use crate::csv::{LoadOptions, clean_column_name};
use crate::error::{IngestError, Result};

/// Extensions read as workbooks rather than delimited text.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// True when `path` has a workbook extension.
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn first_sheet(path: &Path) -> Result<Range<Data>> {
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| workbook_error(e.to_string()))
}

fn header(path: &Path, range: &Range<Data>) -> Result<Vec<String>> {
    let Some(first) = range.rows().next() else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    let columns: Vec<String> = first
        .iter()
        .map(|cell| clean_column_name(&cell.to_string()))
        .collect();
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    if let Some(position) = columns.iter().position(String::is_empty) {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
            position: position + 1,
        });
    }
    Ok(columns)
}

/// Column names from the first row of the first worksheet.
pub fn read_sheet_header(path: &Path) -> Result<Vec<String>> {
    let range = first_sheet(path)?;
    header(path, &range)
}

/// Reads the first worksheet into a table.
///
/// Cells follow the same missing-value rules as delimited input. Without
/// `infer_types`, numeric cells are kept as their text form.
pub fn read_sheet(name: impl Into<String>, path: &Path, options: &LoadOptions) -> Result<Table> {
    let range = first_sheet(path)?;
    let columns = header(path, &range)?;
    let table_error = |source| IngestError::Table {
        path: path.to_path_buf(),
        source,
    };

    let mut table = Table::new(name, columns).map_err(table_error)?;
    for row in range.rows().skip(1) {
        let cells = row
            .iter()
            .map(|cell| data_to_cell(cell, options.infer_types))
            .collect();
        table.push_row(cells).map_err(table_error)?;
    }
    Ok(table)
}

/// Converts one worksheet cell.
///
/// Empty and error cells are missing; text goes through the same sentinel
/// handling as delimited input.
pub fn data_to_cell(data: &Data, infer_types: bool) -> CellValue {
    let number = match data {
        Data::Empty | Data::Error(_) => return CellValue::Missing,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            return CellValue::from_raw(s);
        }
        Data::Bool(b) => return CellValue::Text(b.to_string()),
        Data::Int(v) => *v as f64,
        Data::Float(v) => *v,
        other => return CellValue::from_raw(&other.to_string()),
    };
    if !number.is_finite() {
        return CellValue::Missing;
    }
    let cell = CellValue::Number(number);
    if infer_types {
        cell
    } else {
        CellValue::Text(cell.to_text().into_owned())
    }
}
