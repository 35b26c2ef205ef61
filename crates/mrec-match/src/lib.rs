//! Record-matching engine.
//!
//! Reconciles a base table against a target table: every base row is scored
//! against the target rows (optionally narrowed by an exact key), accepted
//! matches are checked field by field, and the outcome is assembled into a
//! report table.
//!
//! ```text
//! MatchConfig ─▶ MatchPlan ─▶ Matcher<RowScorer> ─▶ MatchResult* ─▶ assemble ─▶ Table
//!                              │ KeyIndex / InvertedIndex
//! ```

pub mod assemble;
pub mod diff;
pub mod error;
pub mod filter;
pub mod index;
pub mod matcher;
pub mod plan;
pub mod progress;
pub mod score;
pub mod tokenize;

use std::time::Instant;

use mrec_model::{MatchConfig, MatchMode, MatchResult, MatchSummary, Table};
use tracing::{debug, info, info_span};

pub use assemble::assemble;
pub use error::{MatchError, Result};
pub use filter::{Candidates, KeyIndex};
pub use index::InvertedIndex;
pub use matcher::{Matcher, select};
pub use plan::{FeedbackColumn, MatchPlan, ResolvedPair};
pub use progress::{NoProgress, Progress};
pub use score::{FuzzyScorer, OverlapScorer, RowScorer, token_sort_ratio};
pub use tokenize::{TokenSet, tokenize, tokenize_str};

/// Output of a full run.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// One result per base row, in base-row order.
    pub results: Vec<MatchResult>,
    pub table: Table,
    pub summary: MatchSummary,
}

/// Matches every base row without assembling a report.
pub fn match_tables(
    base: &Table,
    target: &Table,
    config: &MatchConfig,
    progress: &dyn Progress,
) -> Result<Vec<MatchResult>> {
    let plan = MatchPlan::resolve(base, target, config)?;
    Ok(run_plan(&plan, base, target, progress))
}

/// Validates `config`, matches every base row and assembles the report.
///
/// Configuration problems fail before any row is scanned.
pub fn reconcile(
    base: &Table,
    target: &Table,
    config: &MatchConfig,
    progress: &dyn Progress,
) -> Result<Reconciliation> {
    let span = info_span!(
        "reconcile",
        base = %base.name,
        target = %target.name,
        mode = ?config.mode,
    );
    let _guard = span.enter();
    let start = Instant::now();

    let plan = MatchPlan::resolve(base, target, config)?;
    debug!(
        pairs = plan.pairs.len(),
        key_filter = plan.key.is_some(),
        feedback = plan.feedback.len(),
        threshold = plan.threshold,
        policy = ?plan.policy,
        parallel = plan.parallel,
        "match plan resolved"
    );

    let results = info_span!("scan").in_scope(|| run_plan(&plan, base, target, progress));
    let table = assemble(base, target, &plan, &results)?;
    let summary = MatchSummary::from_results(&results, table.len());

    info!(
        base_rows = summary.base_rows,
        target_rows = target.len(),
        success = summary.success,
        warning = summary.warning,
        failed = summary.failed,
        output_rows = summary.output_rows,
        duration_ms = start.elapsed().as_millis(),
        "reconciliation complete"
    );

    Ok(Reconciliation {
        results,
        table,
        summary,
    })
}

fn run_plan(
    plan: &MatchPlan,
    base: &Table,
    target: &Table,
    progress: &dyn Progress,
) -> Vec<MatchResult> {
    match plan.mode {
        MatchMode::Fuzzy => scan(Matcher::new(plan, base, target, FuzzyScorer), progress),
        MatchMode::SetIntersection => {
            scan(Matcher::new(plan, base, target, OverlapScorer), progress)
        }
    }
}

fn scan<S: RowScorer>(matcher: Matcher<'_, S>, progress: &dyn Progress) -> Vec<MatchResult> {
    debug!(indexed = matcher.uses_index(), "target rows prepared");
    matcher.run(progress)
}
