//! Report export.
//!
//! Writes an assembled report [`Table`] as:
//!
//! - **CSV**: UTF-8 with a byte-order mark, so spreadsheet tools pick the
//!   right encoding for CJK text
//! - **XLSX**: one worksheet with `FAILED` rows filled red and `WARNING`
//!   rows filled orange

mod csv_export;
mod error;
mod xlsx_export;

use std::fs;
use std::path::Path;

use mrec_model::Table;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

pub use csv_export::{UTF8_BOM, write_csv, write_csv_file};
pub use error::{OutputError, Result};
pub use xlsx_export::{build_workbook, write_xlsx};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Xlsx,
}

impl OutputFormat {
    /// Format implied by the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

/// Writes `table` to `path`.
///
/// Without an explicit `format` the extension of `path` decides. Returns
/// the format used.
pub fn export(table: &Table, path: &Path, format: Option<OutputFormat>) -> Result<OutputFormat> {
    let format = match format.or_else(|| OutputFormat::from_path(path)) {
        Some(format) => format,
        None => {
            return Err(OutputError::UnknownFormat {
                path: path.to_path_buf(),
            });
        }
    };

    let _span = info_span!("export", path = %path.display(), format = format.extension()).entered();
    match format {
        OutputFormat::Csv => write_csv_file(table, path)?,
        OutputFormat::Xlsx => write_xlsx(table, path)?,
    }
    debug!(rows = table.len(), "report written");
    Ok(format)
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| OutputError::Create {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/report.CSV")),
            Some(OutputFormat::Csv)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("report.xlsx")),
            Some(OutputFormat::Xlsx)
        );
        assert_eq!(OutputFormat::from_path(Path::new("report.xls")), None);
        assert_eq!(OutputFormat::from_path(Path::new("report")), None);
    }
}
