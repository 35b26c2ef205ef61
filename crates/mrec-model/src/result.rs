//! Per-row match outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closeness of a base/target row pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Score {
    /// Fuzzy similarity in `[0, 100]`.
    Similarity(f64),
    /// Number of shared tokens summed over all field pairs.
    Hits(usize),
}

impl Score {
    /// Numeric form compared against the acceptance threshold.
    pub fn value(self) -> f64 {
        match self {
            Self::Similarity(value) => value,
            Self::Hits(hits) => hits as f64,
        }
    }

    /// Value written to reports: similarities rounded to one decimal, halves
    /// to even.
    pub fn report_value(self) -> f64 {
        match self {
            Self::Similarity(value) => (value * 10.0).round_ties_even() / 10.0,
            Self::Hits(hits) => hits as f64,
        }
    }

    pub fn meets(self, threshold: f64) -> bool {
        self.value() >= threshold
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Similarity(value) => write!(f, "{value:.1}"),
            Self::Hits(hits) => write!(f, "{hits}"),
        }
    }
}

/// A target row proposed for a base row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub target_row: usize,
    pub score: Score,
}

/// Report tag derived from a [`MatchResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Accepted and every mapped field agrees.
    Success,
    /// Accepted, but at least one mapped field differs.
    Warning,
    /// No target row met the threshold.
    Failed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Failed => "FAILED",
        }
    }

    pub fn from_diffs(diffs: &[String]) -> Self {
        if diffs.is_empty() {
            Self::Success
        } else {
            Self::Warning
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome for one base row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchResult {
    NoCandidate,
    /// Ranked best first; `diffs[i]` lists the differing field labels of
    /// `candidates[i]`.
    Accepted {
        candidates: Vec<MatchCandidate>,
        diffs: Vec<Vec<String>>,
    },
}

impl MatchResult {
    pub fn status(&self) -> Status {
        match self {
            Self::NoCandidate => Status::Failed,
            Self::Accepted { diffs, .. } => diffs
                .first()
                .map_or(Status::Success, |top| Status::from_diffs(top)),
        }
    }

    pub fn candidates(&self) -> &[MatchCandidate] {
        match self {
            Self::NoCandidate => &[],
            Self::Accepted { candidates, .. } => candidates,
        }
    }

    pub fn top(&self) -> Option<&MatchCandidate> {
        self.candidates().first()
    }

    pub fn len(&self) -> usize {
        self.candidates().len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates().is_empty()
    }

    /// Candidates paired with their diff lists.
    pub fn matches(&self) -> impl Iterator<Item = (&MatchCandidate, &[String])> {
        let diffs: &[Vec<String>] = match self {
            Self::NoCandidate => &[],
            Self::Accepted { diffs, .. } => diffs,
        };
        self.candidates()
            .iter()
            .enumerate()
            .map(move |(idx, candidate)| {
                let diff = diffs.get(idx).map_or(&[][..], Vec::as_slice);
                (candidate, diff)
            })
    }
}

/// Status counts over a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub base_rows: usize,
    pub success: usize,
    pub warning: usize,
    pub failed: usize,
    pub output_rows: usize,
}

impl MatchSummary {
    pub fn from_results(results: &[MatchResult], output_rows: usize) -> Self {
        let mut summary = Self {
            base_rows: results.len(),
            output_rows,
            ..Self::default()
        };
        for result in results {
            match result.status() {
                Status::Success => summary.success += 1,
                Status::Warning => summary.warning += 1,
                Status::Failed => summary.failed += 1,
            }
        }
        summary
    }

    pub fn matched(&self) -> usize {
        self.success + self.warning
    }

    pub fn match_rate(&self) -> f64 {
        if self.base_rows == 0 {
            0.0
        } else {
            self.matched() as f64 / self.base_rows as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted(diffs: Vec<Vec<String>>) -> MatchResult {
        let candidates = (0..diffs.len())
            .map(|idx| MatchCandidate {
                target_row: idx,
                score: Score::Hits(1),
            })
            .collect();
        MatchResult::Accepted { candidates, diffs }
    }

    #[test]
    fn status_follows_top_candidate() {
        assert_eq!(MatchResult::NoCandidate.status(), Status::Failed);
        assert_eq!(accepted(vec![vec![]]).status(), Status::Success);
        assert_eq!(
            accepted(vec![vec!["director≠导演".to_string()], vec![]]).status(),
            Status::Warning
        );
        assert_eq!(
            accepted(vec![vec![], vec!["director≠导演".to_string()]]).status(),
            Status::Success
        );
    }

    #[test]
    fn score_rendering() {
        assert_eq!(Score::Similarity(93.333_333).to_string(), "93.3");
        assert_eq!(Score::Similarity(93.36).report_value(), 93.4);
        assert_eq!(Score::Hits(2).to_string(), "2");
        assert!(Score::Hits(2).meets(2.0));
        assert!(!Score::Hits(1).meets(2.0));
    }

    #[test]
    fn report_value_rounds_half_to_even() {
        assert_eq!(Score::Similarity(99.25).report_value(), 99.2);
        assert_eq!(Score::Similarity(99.75).report_value(), 99.8);
        assert_eq!(Score::Similarity(0.25).report_value(), 0.2);
        assert_eq!(Score::Similarity(1400.0 / 15.0).report_value(), 93.3);
        assert_eq!(Score::Hits(3).report_value(), 3.0);
    }

    #[test]
    fn summary_counts() {
        let results = vec![
            MatchResult::NoCandidate,
            accepted(vec![vec![]]),
            accepted(vec![vec!["a≠b".to_string()], vec![]]),
        ];
        let summary = MatchSummary::from_results(&results, 4);
        assert_eq!(
            summary,
            MatchSummary {
                base_rows: 3,
                success: 1,
                warning: 1,
                failed: 1,
                output_rows: 4,
            }
        );
        assert_eq!(summary.matched(), 2);
    }

    #[test]
    fn status_serializes_verbatim() {
        let json = serde_json::to_string(&Status::Warning).unwrap();
        assert_eq!(json, "\"WARNING\"");
    }
}
