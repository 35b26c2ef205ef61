//! Exact-key pre-filter narrowing the target rows scored for a base row.

use std::collections::HashMap;

use mrec_model::Table;

/// Target rows to score for one base row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidates<'a> {
    /// Every target row, `0..n`.
    All(usize),
    /// Rows sharing the base row's key, ascending.
    Subset(&'a [usize]),
}

impl Candidates<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::All(n) => *n,
            Self::Subset(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let (range, subset) = match self {
            Self::All(n) => (0..*n, None),
            Self::Subset(rows) => (0..0, Some(rows.iter().copied())),
        };
        range.chain(subset.into_iter().flatten())
    }
}

/// Target rows grouped by the trimmed text of one key column.
///
/// Missing keys group under `""`.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    buckets: HashMap<String, Vec<usize>>,
}

impl KeyIndex {
    pub fn build(target: &Table, column: usize) -> Self {
        let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();
        for row in 0..target.len() {
            let key = target.cell(row, column).to_text().into_owned();
            buckets.entry(key).or_default().push(row);
        }
        Self { buckets }
    }

    /// Target rows whose key equals `key` after trimming.
    pub fn candidates(&self, key: &str) -> &[usize] {
        self.buckets.get(key.trim()).map_or(&[][..], Vec::as_slice)
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Table {
        Table::from_text_rows(
            "target",
            &["title", "year"],
            &[
                &["流浪地球", "2019"],
                &["流浪地球2", "2023"],
                &["哪吒之魔童降世", " 2019 "],
                &["无名", ""],
                &["满江红", "nan"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn groups_by_trimmed_key_in_target_order() {
        let index = KeyIndex::build(&target(), 1);
        assert_eq!(index.candidates("2019"), &[0, 2]);
        assert_eq!(index.candidates(" 2023"), &[1]);
        assert!(index.candidates("2020").is_empty());
        assert_eq!(index.bucket_count(), 3);
    }

    #[test]
    fn missing_keys_match_empty_keys() {
        let index = KeyIndex::build(&target(), 1);
        assert_eq!(index.candidates(""), &[3, 4]);
    }

    #[test]
    fn candidate_iteration() {
        assert_eq!(Candidates::All(3).iter().collect::<Vec<_>>(), vec![0, 1, 2]);
        let rows = [1, 4];
        let subset = Candidates::Subset(&rows);
        assert_eq!(subset.iter().collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(subset.len(), 2);
        assert!(Candidates::Subset(&[]).is_empty());
    }
}
