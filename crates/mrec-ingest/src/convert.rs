//! DataFrame to [`Table`] conversion.

use polars::prelude::{AnyValue, DataFrame};

use mrec_model::{CellValue, ModelError, Table};

use crate::csv::clean_column_name;

/// Converts one Polars value into a cell.
///
/// Nulls, NaN and the textual missing-value sentinels become
/// [`CellValue::Missing`]. Values that cannot be represented fall back to
/// their display form.
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Int8(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int16(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => CellValue::Number(v as f64),
        AnyValue::UInt8(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => CellValue::Number(v as f64),
        AnyValue::Float32(v) => float_cell(f64::from(v)),
        AnyValue::Float64(v) => float_cell(v),
        AnyValue::String(s) => CellValue::from_raw(s),
        AnyValue::StringOwned(s) => CellValue::from_raw(s.as_str()),
        AnyValue::Boolean(b) => CellValue::Text(b.to_string()),
        other => {
            let s = other.to_string();
            let s = s
                .strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
                .unwrap_or(&s);
            CellValue::from_raw(s)
        }
    }
}

fn float_cell(value: f64) -> CellValue {
    if value.is_finite() {
        CellValue::Number(value)
    } else {
        CellValue::Missing
    }
}

/// Copies a DataFrame into a row-oriented table.
///
/// A value Polars cannot hand out is stored as missing rather than failing
/// the whole load.
pub fn frame_to_table(name: impl Into<String>, df: &DataFrame) -> Result<Table, ModelError> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| clean_column_name(name.as_str()))
        .collect();
    let mut table = Table::new(name, columns)?;

    let series = df.get_columns();
    for idx in 0..df.height() {
        let cells = series
            .iter()
            .map(|column| column.get(idx).map_or(CellValue::Missing, any_to_cell))
            .collect();
        table.push_row(cells)?;
    }
    Ok(table)
}
