//! Delimited text export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mrec_model::Table;

use crate::error::{OutputError, Result};
use crate::ensure_parent_dir;

/// UTF-8 byte-order mark, so spreadsheet tools detect the encoding.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `table` as CSV, preceded by a UTF-8 byte-order mark.
///
/// Missing cells are written as empty fields.
pub fn write_csv<W: Write>(table: &Table, mut out: W) -> Result<()> {
    out.write_all(UTF8_BOM).map_err(csv::Error::from)?;

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.cells.iter().map(|cell| cell.to_text().into_owned()))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_csv_file(table: &Table, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    write_csv(table, &mut out)?;
    out.flush().map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_precedes_header() {
        let table = Table::from_text_rows("t", &["片名"], &[&["流浪地球"]]).unwrap();
        let mut buffer = Vec::new();
        write_csv(&table, &mut buffer).unwrap();

        assert!(buffer.starts_with(UTF8_BOM));
        let text = String::from_utf8(buffer[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "片名\n流浪地球\n");
    }

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let table = Table::from_text_rows(
            "t",
            &["title", "cast"],
            &[&["无名, 特别版", ""], &["say \"hi\"", "吴京"]],
        )
        .unwrap();
        let mut buffer = Vec::new();
        write_csv(&table, &mut buffer).unwrap();

        let text = String::from_utf8(buffer[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(
            text,
            "title,cast\n\"无名, 特别版\",\n\"say \"\"hi\"\"\",吴京\n"
        );
    }
}
