//! Delimited file reading through Polars.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

use super::header::parse_header_line;

/// Maximum file size accepted for loading (500 MB default).
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// How a delimited file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field separator, `,` by default.
    pub delimiter: u8,
    /// Infer numeric column types instead of reading every value as text.
    pub infer_types: bool,
    pub max_file_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            infer_types: false,
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Rejects files above `max_size` bytes.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = open(path)?.metadata().map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 input; a UTF-8 byte-order mark is fine.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open(path)?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

/// Reads the column names from the first line of a delimited file.
pub fn read_header(path: &Path, delimiter: u8) -> Result<Vec<String>> {
    let mut reader = BufReader::new(open(path)?);
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    if read == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let columns = parse_header_line(&line, char::from(delimiter));
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

/// Reads a delimited file into a DataFrame.
///
/// Without `infer_types` every column is read as a string so that values
/// like `007` or `2019` survive exactly as written.
pub fn read_frame(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    let infer_length = if options.infer_types { Some(100) } else { Some(0) };
    let delimiter = options.delimiter;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_length)
        .map_parse_options(|parse| parse.with_separator(delimiter))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}
