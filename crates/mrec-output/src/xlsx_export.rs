//! Spreadsheet export with status-keyed row colors.

use std::path::Path;

use mrec_model::{CellValue, STATUS_COLUMN, Status, Table};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::ensure_parent_dir;
use crate::error::{OutputError, Result};

const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

const FAILED_FILL: u32 = 0xFFC7CE;
const WARNING_FILL: u32 = 0xFFD8A8;
const HEADER_FILL: u32 = 0x3498DB;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin)
}

fn fill_format(rgb: u32) -> Format {
    Format::new().set_background_color(Color::RGB(rgb))
}

/// Row formats keyed on the value of the `STATUS` column.
struct RowStyles {
    status_column: Option<usize>,
    failed: Format,
    warning: Format,
}

impl RowStyles {
    fn new(table: &Table) -> Self {
        Self {
            status_column: table.column_index(STATUS_COLUMN),
            failed: fill_format(FAILED_FILL),
            warning: fill_format(WARNING_FILL),
        }
    }

    fn for_row(&self, table: &Table, row: usize) -> Option<&Format> {
        let column = self.status_column?;
        let status = table.cell(row, column).to_text();
        if status == Status::Failed.as_str() {
            Some(&self.failed)
        } else if status == Status::Warning.as_str() {
            Some(&self.warning)
        } else {
            None
        }
    }
}

/// Builds a single-sheet workbook holding `table`.
///
/// Rows whose `STATUS` is `FAILED` are filled red and `WARNING` rows
/// orange; tables without a `STATUS` column are written unstyled.
pub fn build_workbook(table: &Table) -> Result<Workbook> {
    if table.len() + 1 > MAX_ROWS || table.columns().len() > MAX_COLUMNS {
        return Err(OutputError::SheetTooLarge {
            rows: table.len(),
            columns: table.columns().len(),
        });
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name(&table.name))?;
    write_sheet(sheet, table)?;
    Ok(workbook)
}

fn write_sheet(sheet: &mut Worksheet, table: &Table) -> Result<()> {
    let header = header_format();
    for (col, name) in table.columns().iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, &header)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    let styles = RowStyles::new(table);
    for (idx, row) in table.rows().iter().enumerate() {
        let r = (idx + 1) as u32;
        let style = styles.for_row(table, idx);
        for (col, cell) in row.cells.iter().enumerate() {
            let c = col as u16;
            match (cell, style) {
                (CellValue::Number(v), Some(fmt)) if v.is_finite() => {
                    sheet.write_number_with_format(r, c, *v, fmt)?;
                }
                (CellValue::Number(v), None) if v.is_finite() => {
                    sheet.write_number(r, c, *v)?;
                }
                (CellValue::Text(text), Some(fmt)) => {
                    sheet.write_string_with_format(r, c, text.trim(), fmt)?;
                }
                (CellValue::Text(text), None) => {
                    sheet.write_string(r, c, text.trim())?;
                }
                (_, Some(fmt)) => {
                    sheet.write_blank(r, c, fmt)?;
                }
                (_, None) => {}
            }
        }
    }

    sheet.autofit();
    Ok(())
}

/// Worksheet names are limited to 31 characters and may not contain `[]:*?/\`.
fn sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .take(31)
        .collect();
    let cleaned = cleaned.trim_matches('\'').trim().to_string();
    if cleaned.is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}

pub fn write_xlsx(table: &Table, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut workbook = build_workbook(table)?;
    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> Table {
        Table::from_text_rows(
            "report",
            &["title", "SCORE", "STATUS"],
            &[
                &["流浪地球", "100", "SUCCESS"],
                &["流浪地球", "93.3", "WARNING"],
                &["无名", "0", "FAILED"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rows_styled_by_status() {
        let table = report();
        let styles = RowStyles::new(&table);
        assert!(styles.for_row(&table, 0).is_none());
        assert_eq!(styles.for_row(&table, 1), Some(&fill_format(WARNING_FILL)));
        assert_eq!(styles.for_row(&table, 2), Some(&fill_format(FAILED_FILL)));
    }

    #[test]
    fn test_table_without_status_is_unstyled() {
        let table = Table::from_text_rows("plain", &["title"], &[&["FAILED"]]).unwrap();
        assert!(RowStyles::new(&table).for_row(&table, 0).is_none());
    }

    #[test]
    fn test_workbook_serializes() {
        let mut workbook = build_workbook(&report()).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_sheet_name_sanitized() {
        assert_eq!(sheet_name("a/b:c"), "a_b_c");
        assert_eq!(sheet_name(""), "Sheet1");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), 31);
    }
}
