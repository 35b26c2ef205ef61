#![deny(unsafe_code)]

use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::ModelError;

/// Strings the loading layer uses for "no value".
///
/// Spreadsheet and dataframe tooling writes these for empty cells; they are
/// read back as [`CellValue::Missing`] so they never take part in matching.
pub const MISSING_SENTINELS: &[&str] = &[
    "", "nan", "NaN", "NAN", "None", "null", "NULL", "<NA>", "NaT",
];

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    /// Builds a cell from raw text, mapping missing-value sentinels to `Missing`.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if MISSING_SENTINELS.contains(&trimmed) {
            Self::Missing
        } else {
            Self::Text(raw.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Number(value) => !value.is_finite(),
            Self::Text(text) => text.trim().is_empty(),
        }
    }

    /// Trimmed string form used for comparison and export.
    ///
    /// Missing values and non-finite numbers become `""`. Integral numbers
    /// render without a fractional part.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text.trim()),
            Self::Number(value) => Cow::Owned(format_number(*value)),
            Self::Missing => Cow::Borrowed(""),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::from_raw(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if MISSING_SENTINELS.contains(&value.trim()) {
            Self::Missing
        } else {
            Self::Text(value)
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Formats a number without a trailing `.0` for integral values.
fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    pub cells: Vec<CellValue>,
}

impl Row {
    pub fn get(&self, column: usize) -> &CellValue {
        self.cells.get(column).unwrap_or(&CellValue::Missing)
    }
}

/// An ordered set of rows sharing one set of named columns.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
    #[serde(skip)]
    lookup: HashMap<String, usize>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Result<Self, ModelError> {
        let name = name.into();
        let mut lookup = HashMap::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            if lookup.insert(column.clone(), idx).is_some() {
                return Err(ModelError::DuplicateColumn {
                    table: name,
                    column: column.clone(),
                });
            }
        }
        Ok(Self {
            name,
            columns,
            rows: Vec::new(),
            lookup,
        })
    }

    /// Builds a table from string rows; convenient for fixtures and tests.
    pub fn from_text_rows(
        name: impl Into<String>,
        columns: &[&str],
        rows: &[&[&str]],
    ) -> Result<Self, ModelError> {
        let mut table = Self::new(name, columns.iter().map(|c| (*c).to_string()).collect())?;
        for row in rows {
            table.push_row(row.iter().map(|value| CellValue::from_raw(value)).collect())?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, cells: Vec<CellValue>) -> Result<(), ModelError> {
        if cells.len() != self.columns.len() {
            return Err(ModelError::RowWidth {
                table: self.name.clone(),
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: cells.len(),
            });
        }
        self.rows.push(Row { cells });
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        if self.lookup.len() == self.columns.len() {
            return self.lookup.get(name).copied();
        }
        // Deserialized tables skip the lookup map.
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at (`row`, `column`), `Missing` when out of range.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .map_or(&CellValue::Missing, |r| r.get(column))
    }

    /// Looks a cell up by column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r.get(idx))
    }
}
