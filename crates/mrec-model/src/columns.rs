//! Names of the columns the engine appends to a report.

/// Score of the reported match; fuzzy scores are rounded to one decimal.
pub const SCORE_COLUMN: &str = "SCORE";
/// `SUCCESS`, `WARNING` or `FAILED`; exporters key row styling off it.
pub const STATUS_COLUMN: &str = "STATUS";
/// Mapped fields whose values differ, as `base≠target` labels.
pub const DIFF_COLUMN: &str = "DIFF";
/// Single-row reports: number of accepted matches.
pub const MATCH_COUNT_COLUMN: &str = "MATCH_COUNT";
/// Exploded reports: 1-based rank of the match within its base row.
pub const MATCH_RANK_COLUMN: &str = "MATCH_RANK";
