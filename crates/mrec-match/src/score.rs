//! Row similarity scoring.
//!
//! Both matching modes share the [`RowScorer`] capability: a row is first
//! prepared into a comparable form (once per target row, once per base row)
//! and prepared pairs are then scored. The matcher is generic over the
//! scorer so switching modes never duplicates the scan.

use mrec_model::{Score, Table};
use rapidfuzz::distance::indel;

use crate::tokenize::{TokenSet, tokenize};

pub trait RowScorer: Sync {
    /// Comparable form of one row's mapped fields.
    type Prepared: Send + Sync;

    fn prepare(&self, table: &Table, row: usize, columns: &[usize]) -> Self::Prepared;

    fn score(&self, base: &Self::Prepared, target: &Self::Prepared) -> Score;

    /// Per-field token sets, for scorers whose score is a token overlap.
    ///
    /// Scorers returning `Some` can be served by an
    /// [`InvertedIndex`](crate::index::InvertedIndex).
    fn token_sets(_prepared: &Self::Prepared) -> Option<&[TokenSet]> {
        None
    }
}

/// Whole-string fuzzy scoring over the concatenated mapped fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyScorer;

impl RowScorer for FuzzyScorer {
    /// Token-sorted comparison string.
    type Prepared = String;

    fn prepare(&self, table: &Table, row: usize, columns: &[usize]) -> String {
        sort_tokens(&comparison_string(table, row, columns))
    }

    fn score(&self, base: &String, target: &String) -> Score {
        Score::Similarity(sorted_ratio(base, target))
    }
}

/// Per-field token overlap, summed across field pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapScorer;

impl RowScorer for OverlapScorer {
    type Prepared = Vec<TokenSet>;

    fn prepare(&self, table: &Table, row: usize, columns: &[usize]) -> Vec<TokenSet> {
        columns
            .iter()
            .map(|&column| tokenize(table.cell(row, column)))
            .collect()
    }

    fn score(&self, base: &Vec<TokenSet>, target: &Vec<TokenSet>) -> Score {
        Score::Hits(row_hits(base, target))
    }

    fn token_sets(prepared: &Vec<TokenSet>) -> Option<&[TokenSet]> {
        Some(prepared.as_slice())
    }
}

/// Joins the trimmed text of `columns` with single spaces.
///
/// Missing cells contribute nothing, so they never introduce stray spaces.
pub fn comparison_string(table: &Table, row: usize, columns: &[usize]) -> String {
    let mut parts = Vec::with_capacity(columns.len());
    for &column in columns {
        let text = table.cell(row, column).to_text();
        if !text.is_empty() {
            parts.push(text);
        }
    }
    parts.join(" ")
}

/// Splits on whitespace, sorts the words by code point and rejoins them.
pub fn sort_tokens(value: &str) -> String {
    let mut tokens: Vec<&str> = value.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Token-sort similarity in `[0, 100]`; identical word multisets score 100.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    sorted_ratio(&sort_tokens(a), &sort_tokens(b))
}

fn sorted_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    100.0 * indel::normalized_similarity(a.chars(), b.chars())
}

/// Number of tokens the two sets share.
pub fn field_hits(base: &TokenSet, target: &TokenSet) -> usize {
    let (small, large) = if base.len() <= target.len() {
        (base, target)
    } else {
        (target, base)
    };
    small.iter().filter(|token| large.contains(*token)).count()
}

pub fn row_hits(base: &[TokenSet], target: &[TokenSet]) -> usize {
    base.iter()
        .zip(target)
        .map(|(b, t)| field_hits(b, t))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenize_str;

    #[test]
    fn word_order_is_ignored() {
        assert_eq!(token_sort_ratio("郭帆 流浪地球", "流浪地球 郭帆"), 100.0);
        assert_eq!(token_sort_ratio("  a   b ", "b a"), 100.0);
    }

    #[test]
    fn pinned_sequel_score() {
        // "流浪地球 郭帆" (7 chars) vs "流浪地球2 郭帆" (8 chars): one insertion.
        let score = token_sort_ratio("流浪地球 郭帆", "流浪地球2 郭帆");
        assert!((score - 1400.0 / 15.0).abs() < 1e-9, "{score}");
        assert!(score >= 85.0);
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(token_sort_ratio("", "流浪地球"), 0.0);
        assert_eq!(token_sort_ratio("   ", ""), 0.0);
        assert_eq!(token_sort_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn comparison_string_skips_missing() {
        let table = Table::from_text_rows(
            "t",
            &["title", "director", "year"],
            &[&[" 流浪地球 ", "nan", "2019"]],
        )
        .unwrap();
        assert_eq!(comparison_string(&table, 0, &[0, 1, 2]), "流浪地球 2019");
        assert_eq!(comparison_string(&table, 0, &[1]), "");
    }

    #[test]
    fn overlap_counts_shared_tokens() {
        let base = tokenize_str("吴京/屈楚萧/李光洁/吴孟达/赵今麦");
        let target = tokenize_str("吴京, 赵今麦");
        assert_eq!(field_hits(&base, &target), 2);
        assert_eq!(field_hits(&target, &base), 2);
        assert_eq!(
            row_hits(&[base, tokenize_str("郭帆")], &[target, tokenize_str("郭帆")]),
            3
        );
    }

    #[test]
    fn scorers_prepare_mapped_columns() {
        let table = Table::from_text_rows(
            "t",
            &["title", "director"],
            &[&["流浪地球", "郭帆"], &["郭帆", "流浪地球"]],
        )
        .unwrap();
        let fuzzy = FuzzyScorer;
        let a = fuzzy.prepare(&table, 0, &[0, 1]);
        let b = fuzzy.prepare(&table, 1, &[0, 1]);
        assert_eq!(fuzzy.score(&a, &b), Score::Similarity(100.0));

        let overlap = OverlapScorer;
        let a = overlap.prepare(&table, 0, &[0, 1]);
        let b = overlap.prepare(&table, 1, &[0, 1]);
        assert_eq!(overlap.score(&a, &b), Score::Hits(0));
        assert_eq!(overlap.score(&a, &a), Score::Hits(2));
        assert!(OverlapScorer::token_sets(&a).is_some());
        assert!(FuzzyScorer::token_sets(&String::new()).is_none());
    }
}
