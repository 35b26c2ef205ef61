//! Validation of a [`MatchConfig`] against concrete tables.
//!
//! Every configuration problem is reported here, before the first row is
//! scanned. The resulting [`MatchPlan`] refers to columns by index.

use std::collections::HashSet;

use mrec_model::{
    AcceptancePolicy, ConfigError, DIFF_COLUMN, MATCH_COUNT_COLUMN, MATCH_RANK_COLUMN,
    MatchConfig, MatchMode, OutputMode, OutputOptions, SCORE_COLUMN, STATUS_COLUMN, Table,
    TableRole,
};

/// A mapped field pair resolved to column indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPair {
    pub base: usize,
    pub target: usize,
    pub label: String,
}

/// A target column copied into the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackColumn {
    pub target: usize,
    pub output_name: String,
}

#[derive(Debug, Clone)]
pub struct MatchPlan {
    pub mode: MatchMode,
    pub policy: AcceptancePolicy,
    pub threshold: f64,
    pub pairs: Vec<ResolvedPair>,
    /// (base column, target column) of the equality pre-filter.
    pub key: Option<(usize, usize)>,
    pub feedback: Vec<FeedbackColumn>,
    pub track_diffs: bool,
    pub use_index: bool,
    pub parallel: bool,
    pub output: OutputOptions,
}

impl MatchPlan {
    pub fn resolve(base: &Table, target: &Table, config: &MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut pairs = Vec::with_capacity(config.mapping.len());
        for pair in &config.mapping {
            pairs.push(ResolvedPair {
                base: resolve(base, TableRole::Base, "mapping", &pair.base)?,
                target: resolve(target, TableRole::Target, "mapping", &pair.target)?,
                label: pair.label(),
            });
        }

        let key = match &config.key_filter {
            Some(filter) => Some((
                resolve(base, TableRole::Base, "key filter", &filter.base)?,
                resolve(target, TableRole::Target, "key filter", &filter.target)?,
            )),
            None => None,
        };

        let mut feedback = Vec::with_capacity(config.feedback_fields.len());
        for field in &config.feedback_fields {
            feedback.push(FeedbackColumn {
                target: resolve(target, TableRole::Target, "feedback", field)?,
                output_name: format!("{}{}", config.output.feedback_prefix, field),
            });
        }

        let plan = Self {
            mode: config.mode,
            policy: config.policy,
            threshold: config.effective_threshold(),
            pairs,
            key,
            feedback,
            track_diffs: config.track_diffs,
            use_index: config.use_index,
            parallel: config.parallel,
            output: config.output.clone(),
        };
        plan.check_output_columns(base)?;
        Ok(plan)
    }

    pub fn base_columns(&self) -> Vec<usize> {
        self.pairs.iter().map(|p| p.base).collect()
    }

    pub fn target_columns(&self) -> Vec<usize> {
        self.pairs.iter().map(|p| p.target).collect()
    }

    /// Columns appended after the base columns, in order.
    pub fn generated_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = self
            .feedback
            .iter()
            .map(|f| f.output_name.clone())
            .collect();
        columns.push(SCORE_COLUMN.to_string());
        columns.push(match self.output.mode {
            OutputMode::SingleRow => MATCH_COUNT_COLUMN.to_string(),
            OutputMode::Exploded => MATCH_RANK_COLUMN.to_string(),
        });
        columns.push(STATUS_COLUMN.to_string());
        columns.push(DIFF_COLUMN.to_string());
        columns
    }

    pub fn output_columns(&self, base: &Table) -> Vec<String> {
        let mut columns = base.columns().to_vec();
        columns.extend(self.generated_columns());
        columns
    }

    fn check_output_columns(&self, base: &Table) -> Result<(), ConfigError> {
        let mut seen: HashSet<&str> = base.columns().iter().map(String::as_str).collect();
        let generated = self.generated_columns();
        for column in &generated {
            if !seen.insert(column.as_str()) {
                return Err(ConfigError::OutputColumnCollision {
                    column: column.clone(),
                });
            }
        }
        Ok(())
    }
}

fn resolve(
    table: &Table,
    role: TableRole,
    usage: &'static str,
    field: &str,
) -> Result<usize, ConfigError> {
    table
        .column_index(field)
        .ok_or_else(|| ConfigError::UnknownField {
            role,
            usage,
            table: table.name.clone(),
            field: field.to_string(),
        })
}
