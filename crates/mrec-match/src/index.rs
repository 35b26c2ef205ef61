//! Inverted token index for set-intersection scoring.
//!
//! Maps each token of each mapped target field to the target rows whose
//! field contains it. Accumulating posting lists for a query row yields the
//! same hit counts as intersecting the query with every target row, while
//! only touching rows that share at least one token.

use std::collections::HashMap;

use crate::tokenize::TokenSet;

#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    fields: Vec<HashMap<String, Vec<usize>>>,
    rows: usize,
}

impl InvertedIndex {
    /// Builds the index from per-row, per-field token sets.
    pub fn build<'a, I>(field_count: usize, rows: I) -> Self
    where
        I: IntoIterator<Item = &'a [TokenSet]>,
    {
        let mut fields: Vec<HashMap<String, Vec<usize>>> = vec![HashMap::new(); field_count];
        let mut count = 0;
        for (row, sets) in rows.into_iter().enumerate() {
            for (postings, tokens) in fields.iter_mut().zip(sets) {
                for token in tokens {
                    postings.entry(token.clone()).or_default().push(row);
                }
            }
            count = row + 1;
        }
        Self {
            fields,
            rows: count,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn token_count(&self) -> usize {
        self.fields.iter().map(HashMap::len).sum()
    }

    /// Hit counts of `query` against every indexed row.
    ///
    /// `hits` is cleared and resized to [`rows`](Self::rows).
    pub fn accumulate(&self, query: &[TokenSet], hits: &mut Vec<usize>) {
        hits.clear();
        hits.resize(self.rows, 0);
        for (postings, tokens) in self.fields.iter().zip(query) {
            for token in tokens {
                if let Some(rows) = postings.get(token) {
                    for &row in rows {
                        hits[row] += 1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::row_hits;
    use crate::tokenize::tokenize_str;

    fn rows(values: &[&[&str]]) -> Vec<Vec<TokenSet>> {
        values
            .iter()
            .map(|row| row.iter().map(|v| tokenize_str(v)).collect())
            .collect()
    }

    #[test]
    fn hits_equal_pairwise_intersection() {
        let targets = rows(&[
            &["李四", "流浪地球"],
            &["王五", "流浪地球2"],
            &["张三/王五", "无名"],
            &["", ""],
        ]);
        let index = InvertedIndex::build(2, targets.iter().map(Vec::as_slice));
        assert_eq!(index.rows(), 4);

        let query = tokenize_str("张三/李四/王五");
        let query = vec![query, tokenize_str("流浪地球")];
        let mut hits = Vec::new();
        index.accumulate(&query, &mut hits);

        let naive: Vec<usize> = targets.iter().map(|t| row_hits(&query, t)).collect();
        assert_eq!(hits, naive);
        assert_eq!(hits, vec![2, 1, 2, 0]);
    }

    #[test]
    fn empty_index() {
        let index = InvertedIndex::build(1, std::iter::empty());
        let mut hits = vec![7];
        index.accumulate(&[tokenize_str("a")], &mut hits);
        assert!(hits.is_empty());
        assert_eq!(index.token_count(), 0);
    }
}
