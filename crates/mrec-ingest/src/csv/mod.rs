//! Delimited file reading.

mod header;
mod reader;

pub use header::{clean_column_name, parse_header_line};
pub use reader::{
    LoadOptions, MAX_FILE_SIZE, check_file_size, read_frame, read_header, validate_encoding,
};
