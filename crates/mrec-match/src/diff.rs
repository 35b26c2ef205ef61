//! Field-level comparison of an accepted match.

use mrec_model::Table;

use crate::plan::ResolvedPair;

/// Labels of the mapped pairs whose trimmed text differs, in mapping order.
///
/// Comparison is exact: token overlap that made the row match does not make
/// the fields equal.
pub fn field_diffs(
    base: &Table,
    base_row: usize,
    target: &Table,
    target_row: usize,
    pairs: &[ResolvedPair],
) -> Vec<String> {
    pairs
        .iter()
        .filter(|pair| {
            base.cell(base_row, pair.base).to_text() != target.cell(target_row, pair.target).to_text()
        })
        .map(|pair| pair.label.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(base: usize, target: usize, label: &str) -> ResolvedPair {
        ResolvedPair {
            base,
            target,
            label: label.to_string(),
        }
    }

    #[test]
    fn lists_differing_pairs_in_order() {
        let base =
            Table::from_text_rows("b", &["title", "director"], &[&["流浪地球 ", "张三/李四"]])
                .unwrap();
        let target =
            Table::from_text_rows("t", &["片名", "导演"], &[&["流浪地球", "李四"]]).unwrap();
        let pairs = [pair(0, 0, "title≠片名"), pair(1, 1, "director≠导演")];
        assert_eq!(
            field_diffs(&base, 0, &target, 0, &pairs),
            vec!["director≠导演"]
        );
    }

    #[test]
    fn missing_equals_empty() {
        let base = Table::from_text_rows("b", &["year"], &[&["nan"]]).unwrap();
        let target = Table::from_text_rows("t", &["year"], &[&[""]]).unwrap();
        assert!(field_diffs(&base, 0, &target, 0, &[pair(0, 0, "year≠year")]).is_empty());
    }
}
