//! Error types for the reconciliation data model.

use thiserror::Error;

/// Errors raised while building tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A row does not have one cell per column.
    #[error("row {row} of table '{table}' has {actual} cells, expected {expected}")]
    RowWidth {
        table: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// The same column name appears twice in one table.
    #[error("duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },
}

/// Which side of a reconciliation a field name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    Base,
    Target,
}

impl std::fmt::Display for TableRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Configuration errors.
///
/// These are raised before any row is scanned; a run that fails with a
/// `ConfigError` produces no partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// No field pairs were supplied.
    #[error("field mapping is empty: at least one base/target field pair is required")]
    EmptyMapping,

    /// The base and target field lists differ in length.
    #[error("field mapping length mismatch: {base} base fields vs {target} target fields")]
    MappingLengthMismatch { base: usize, target: usize },

    /// A referenced field does not exist in the table it names.
    #[error("unknown {role} field '{field}' ({usage}) in table '{table}'")]
    UnknownField {
        role: TableRole,
        usage: &'static str,
        table: String,
        field: String,
    },

    /// The threshold is not usable for the selected mode.
    #[error("invalid threshold {value}: {reason}")]
    InvalidThreshold { value: f64, reason: &'static str },

    /// `top-n` acceptance requested with `n = 0`.
    #[error("top-n acceptance requires n >= 1")]
    ZeroTopN,

    /// A generated output column would shadow an existing one.
    #[error("output column '{column}' collides with an existing column")]
    OutputColumnCollision { column: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::MappingLengthMismatch { base: 3, target: 2 };
        assert_eq!(
            err.to_string(),
            "field mapping length mismatch: 3 base fields vs 2 target fields"
        );

        let err = ConfigError::UnknownField {
            role: TableRole::Target,
            usage: "feedback",
            table: "catalog".to_string(),
            field: "id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown target field 'id' (feedback) in table 'catalog'"
        );
    }
}
