//! Configuration for a reconciliation run.
//!
//! A [`MatchConfig`] is built once by the caller (CLI flags, a JSON file, or
//! code) and handed to the engine; the engine keeps no other state.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mapping::{FieldMapping, FieldPair};

/// Default fuzzy acceptance threshold, in percent.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 85.0;
/// Default minimum hit count for set-intersection matching.
pub const DEFAULT_MIN_HITS: f64 = 1.0;

/// How two rows are scored against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Token-sort similarity over the concatenated mapped fields, 0-100.
    #[default]
    Fuzzy,
    /// Sum over field pairs of shared delimited tokens.
    SetIntersection,
}

impl MatchMode {
    pub fn default_threshold(self) -> f64 {
        match self {
            Self::Fuzzy => DEFAULT_FUZZY_THRESHOLD,
            Self::SetIntersection => DEFAULT_MIN_HITS,
        }
    }
}

/// Which qualifying candidates are kept for a base row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AcceptancePolicy {
    /// The single highest-scoring candidate; ties go to the earliest target row.
    #[default]
    BestOnly,
    /// Every candidate at or above the threshold, best first.
    AllQualifying,
    /// Like `AllQualifying`, truncated to the first `n` candidates.
    TopN { n: usize },
}

impl AcceptancePolicy {
    /// Maximum number of candidates kept, `None` for unbounded.
    pub fn limit(self) -> Option<usize> {
        match self {
            Self::BestOnly => Some(1),
            Self::AllQualifying => None,
            Self::TopN { n } => Some(n),
        }
    }
}

/// Shape of the assembled output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// One row per base row; feedback from all matches joined.
    #[default]
    SingleRow,
    /// One row per (base row, accepted match).
    Exploded,
}

/// Exact-equality pre-filter between one base and one target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFilter {
    pub base: String,
    pub target: String,
}

impl From<FieldPair> for KeyFilter {
    fn from(pair: FieldPair) -> Self {
        Self {
            base: pair.base,
            target: pair.target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    pub mode: OutputMode,
    /// Prefix for copied feedback columns (`MATCH_id`).
    pub feedback_prefix: String,
    /// Value written when a feedback field has nothing to report.
    pub absent_marker: String,
    /// Joins feedback values of several matches in single-row mode.
    pub separator: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::SingleRow,
            feedback_prefix: "MATCH_".to_string(),
            absent_marker: "NOT_FOUND".to_string(),
            separator: " | ".to_string(),
        }
    }
}

/// Everything the engine needs besides the two tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub mapping: FieldMapping,
    #[serde(default)]
    pub mode: MatchMode,
    #[serde(default)]
    pub policy: AcceptancePolicy,
    /// Falls back to [`MatchMode::default_threshold`] when unset.
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub key_filter: Option<KeyFilter>,
    #[serde(default)]
    pub feedback_fields: Vec<String>,
    /// Compare mapped fields of accepted matches and report differences.
    #[serde(default = "default_true")]
    pub track_diffs: bool,
    /// Use an inverted token index in set-intersection mode.
    #[serde(default = "default_true")]
    pub use_index: bool,
    /// Score base rows on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub output: OutputOptions,
}

fn default_true() -> bool {
    true
}

impl MatchConfig {
    pub fn new(mapping: FieldMapping) -> Self {
        Self {
            mapping,
            mode: MatchMode::default(),
            policy: AcceptancePolicy::default(),
            threshold: None,
            key_filter: None,
            feedback_fields: Vec::new(),
            track_diffs: true,
            use_index: true,
            parallel: false,
            output: OutputOptions::default(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: AcceptancePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn with_key_filter(mut self, base: impl Into<String>, target: impl Into<String>) -> Self {
        self.key_filter = Some(KeyFilter {
            base: base.into(),
            target: target.into(),
        });
        self
    }

    #[must_use]
    pub fn with_feedback<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feedback_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output.mode = mode;
        self
    }

    #[must_use]
    pub fn with_track_diffs(mut self, enable: bool) -> Self {
        self.track_diffs = enable;
        self
    }

    #[must_use]
    pub fn with_index(mut self, enable: bool) -> Self {
        self.use_index = enable;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    pub fn effective_threshold(&self) -> f64 {
        self.threshold
            .unwrap_or_else(|| self.mode.default_threshold())
    }

    /// Checks the settings that do not depend on the tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.effective_threshold();
        if !threshold.is_finite() {
            return Err(ConfigError::InvalidThreshold {
                value: threshold,
                reason: "threshold must be a finite number",
            });
        }
        if self.mode == MatchMode::SetIntersection && threshold < DEFAULT_MIN_HITS {
            return Err(ConfigError::InvalidThreshold {
                value: threshold,
                reason: "set-intersection matching needs at least one shared token",
            });
        }
        if self.policy == (AcceptancePolicy::TopN { n: 0 }) {
            return Err(ConfigError::ZeroTopN);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> FieldMapping {
        FieldMapping::from_lists(&["title"], &["片名"]).unwrap()
    }

    #[test]
    fn threshold_defaults_follow_mode() {
        let config = MatchConfig::new(mapping());
        assert_eq!(config.effective_threshold(), 85.0);
        let config = config.with_mode(MatchMode::SetIntersection);
        assert_eq!(config.effective_threshold(), 1.0);
        assert_eq!(config.with_threshold(3.0).effective_threshold(), 3.0);
    }

    #[test]
    fn validate_rejects_bad_thresholds() {
        let config = MatchConfig::new(mapping()).with_threshold(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold { .. })
        ));

        let config = MatchConfig::new(mapping())
            .with_mode(MatchMode::SetIntersection)
            .with_threshold(0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_top_n() {
        let config = MatchConfig::new(mapping()).with_policy(AcceptancePolicy::TopN { n: 0 });
        assert_eq!(config.validate(), Err(ConfigError::ZeroTopN));
    }

    #[test]
    fn policy_limits() {
        assert_eq!(AcceptancePolicy::BestOnly.limit(), Some(1));
        assert_eq!(AcceptancePolicy::AllQualifying.limit(), None);
        assert_eq!(AcceptancePolicy::TopN { n: 4 }.limit(), Some(4));
    }
}
