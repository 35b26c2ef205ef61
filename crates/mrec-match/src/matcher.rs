//! The base × target scan.
//!
//! Cost is dominated by `|base| × |candidates| × fields` scorer calls. The
//! key pre-filter shrinks the candidate set; the inverted index replaces the
//! full scan for overlap scoring. Base rows are independent, so the
//! parallel path scores them on the rayon pool and collects results back
//! into base-row order.

use std::sync::atomic::{AtomicUsize, Ordering};

use mrec_model::{AcceptancePolicy, MatchCandidate, MatchResult, Score, Table};
use rayon::prelude::*;
use tracing::trace;

use crate::diff::field_diffs;
use crate::filter::{Candidates, KeyIndex};
use crate::index::InvertedIndex;
use crate::plan::MatchPlan;
use crate::progress::Progress;
use crate::score::RowScorer;

pub struct Matcher<'a, S: RowScorer> {
    plan: &'a MatchPlan,
    base: &'a Table,
    target: &'a Table,
    scorer: S,
    base_columns: Vec<usize>,
    targets: Vec<S::Prepared>,
    keys: Option<KeyIndex>,
    index: Option<InvertedIndex>,
}

impl<'a, S: RowScorer> Matcher<'a, S> {
    /// Prepares every target row once and builds the lookup structures the
    /// plan asks for.
    pub fn new(plan: &'a MatchPlan, base: &'a Table, target: &'a Table, scorer: S) -> Self {
        let target_columns = plan.target_columns();
        let targets: Vec<S::Prepared> = if plan.parallel {
            (0..target.len())
                .into_par_iter()
                .map(|row| scorer.prepare(target, row, &target_columns))
                .collect()
        } else {
            (0..target.len())
                .map(|row| scorer.prepare(target, row, &target_columns))
                .collect()
        };

        let keys = plan.key.map(|(_, column)| KeyIndex::build(target, column));
        let index = if plan.use_index {
            targets
                .iter()
                .map(S::token_sets)
                .collect::<Option<Vec<_>>>()
                .map(|sets| InvertedIndex::build(target_columns.len(), sets))
        } else {
            None
        };

        Self {
            plan,
            base,
            target,
            scorer,
            base_columns: plan.base_columns(),
            targets,
            keys,
            index,
        }
    }

    pub fn uses_index(&self) -> bool {
        self.index.is_some()
    }

    /// Target rows eligible for `row`, in target order.
    pub fn candidates(&self, row: usize) -> Candidates<'_> {
        match (&self.keys, self.plan.key) {
            (Some(keys), Some((column, _))) => {
                Candidates::Subset(keys.candidates(&self.base.cell(row, column).to_text()))
            }
            _ => Candidates::All(self.target.len()),
        }
    }

    /// Scores every eligible target row for `row`, in target order.
    ///
    /// `scratch` is a reusable hit-count buffer for the indexed path.
    pub fn score_row(&self, row: usize, scratch: &mut Vec<usize>) -> Vec<MatchCandidate> {
        let query = self.scorer.prepare(self.base, row, &self.base_columns);
        let candidates = self.candidates(row);

        // The index only answers full scans; filtered subsets are small.
        if let (Candidates::All(_), Some(index), Some(tokens)) =
            (candidates, &self.index, S::token_sets(&query))
        {
            index.accumulate(tokens, scratch);
            return scratch
                .iter()
                .enumerate()
                .map(|(target_row, &hits)| MatchCandidate {
                    target_row,
                    score: Score::Hits(hits),
                })
                .collect();
        }

        candidates
            .iter()
            .map(|target_row| MatchCandidate {
                target_row,
                score: self.scorer.score(&query, &self.targets[target_row]),
            })
            .collect()
    }

    pub fn match_row(&self, row: usize, scratch: &mut Vec<usize>) -> MatchResult {
        let scored = self.score_row(row, scratch);
        let considered = scored.len();
        let accepted = select(scored, self.plan.policy, self.plan.threshold);
        trace!(row, considered, accepted = accepted.len(), "scored base row");

        if accepted.is_empty() {
            return MatchResult::NoCandidate;
        }
        let diffs = accepted
            .iter()
            .map(|candidate| {
                if self.plan.track_diffs {
                    field_diffs(
                        self.base,
                        row,
                        self.target,
                        candidate.target_row,
                        &self.plan.pairs,
                    )
                } else {
                    Vec::new()
                }
            })
            .collect();
        MatchResult::Accepted {
            candidates: accepted,
            diffs,
        }
    }

    /// Matches every base row, in base-row order.
    pub fn run(&self, progress: &dyn Progress) -> Vec<MatchResult> {
        let total = self.base.len();
        let done = AtomicUsize::new(0);
        let tick = || {
            let n = done.fetch_add(1, Ordering::Relaxed) + 1;
            progress.row_done(n, total);
        };

        if self.plan.parallel {
            (0..total)
                .into_par_iter()
                .map_init(Vec::new, |scratch, row| {
                    let result = self.match_row(row, scratch);
                    tick();
                    result
                })
                .collect()
        } else {
            let mut scratch = Vec::new();
            (0..total)
                .map(|row| {
                    let result = self.match_row(row, &mut scratch);
                    tick();
                    result
                })
                .collect()
        }
    }
}

/// Applies the acceptance policy to candidates scored in target order.
///
/// Ranking is by descending score; equal scores keep target order, so the
/// earliest target row wins ties.
pub fn select(
    mut scored: Vec<MatchCandidate>,
    policy: AcceptancePolicy,
    threshold: f64,
) -> Vec<MatchCandidate> {
    if policy == AcceptancePolicy::BestOnly {
        let mut best: Option<MatchCandidate> = None;
        for candidate in scored {
            if best.is_none_or(|b| candidate.score.value() > b.score.value()) {
                best = Some(candidate);
            }
        }
        return best
            .filter(|b| b.score.meets(threshold))
            .into_iter()
            .collect();
    }

    scored.retain(|candidate| candidate.score.meets(threshold));
    scored.sort_by(|a, b| b.score.value().total_cmp(&a.score.value()));
    if let Some(limit) = policy.limit() {
        scored.truncate(limit);
    }
    scored
}
