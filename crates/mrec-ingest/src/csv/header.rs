//! Header line parsing.

/// Splits one delimited line into trimmed fields, honouring double quotes.
///
/// A leading UTF-8 byte-order mark is dropped.
pub fn parse_header_line(line: &str, delimiter: char) -> Vec<String> {
    let line = line.strip_prefix('\u{feff}').unwrap_or(line);
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => in_quotes = true,
            '"' => {
                // "" inside quotes is a literal quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            c if c == delimiter && !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            '\r' | '\n' if !in_quotes => {}
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Column name as it should appear in a [`mrec_model::Table`].
pub fn clean_column_name(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_string()
}
