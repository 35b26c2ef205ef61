//! Data model for media-title reconciliation.
//!
//! A run compares a *base* table against a *target* table under a
//! [`MatchConfig`] and yields one [`MatchResult`] per base row.

pub mod columns;
pub mod error;
pub mod mapping;
pub mod options;
pub mod result;
pub mod table;

pub use columns::{
    DIFF_COLUMN, MATCH_COUNT_COLUMN, MATCH_RANK_COLUMN, SCORE_COLUMN, STATUS_COLUMN,
};
pub use error::{ConfigError, ModelError, TableRole};
pub use mapping::{FieldMapping, FieldPair};
pub use options::{
    AcceptancePolicy, DEFAULT_FUZZY_THRESHOLD, DEFAULT_MIN_HITS, KeyFilter, MatchConfig,
    MatchMode, OutputMode, OutputOptions,
};
pub use result::{MatchCandidate, MatchResult, MatchSummary, Score, Status};
pub use table::{CellValue, MISSING_SENTINELS, Row, Table};
