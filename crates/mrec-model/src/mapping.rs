//! Field mapping between the base and target tables.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One base field compared against one target field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPair {
    pub base: String,
    pub target: String,
}

impl FieldPair {
    pub fn new(base: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            target: target.into(),
        }
    }

    /// Label used in diff reports, e.g. `director≠导演`.
    pub fn label(&self) -> String {
        format!("{}≠{}", self.base, self.target)
    }

    /// Parses `BASE=TARGET`; a bare `NAME` maps a field onto itself.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        match text.split_once('=') {
            Some((base, target)) => {
                let (base, target) = (base.trim(), target.trim());
                if base.is_empty() || target.is_empty() {
                    None
                } else {
                    Some(Self::new(base, target))
                }
            }
            None => Some(Self::new(text, text)),
        }
    }
}

/// Ordered, non-empty list of field pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldPair>", into = "Vec<FieldPair>")]
pub struct FieldMapping {
    pairs: Vec<FieldPair>,
}

impl FieldMapping {
    pub fn new(pairs: Vec<FieldPair>) -> Result<Self, ConfigError> {
        if pairs.is_empty() {
            return Err(ConfigError::EmptyMapping);
        }
        Ok(Self { pairs })
    }

    /// Zips two parallel field lists, as a column-picker UI would supply them.
    pub fn from_lists<B, T>(base: &[B], target: &[T]) -> Result<Self, ConfigError>
    where
        B: AsRef<str>,
        T: AsRef<str>,
    {
        if base.len() != target.len() {
            return Err(ConfigError::MappingLengthMismatch {
                base: base.len(),
                target: target.len(),
            });
        }
        Self::new(
            base.iter()
                .zip(target)
                .map(|(b, t)| FieldPair::new(b.as_ref(), t.as_ref()))
                .collect(),
        )
    }

    pub fn pairs(&self) -> &[FieldPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldPair> {
        self.pairs.iter()
    }
}

impl TryFrom<Vec<FieldPair>> for FieldMapping {
    type Error = ConfigError;

    fn try_from(pairs: Vec<FieldPair>) -> Result<Self, Self::Error> {
        Self::new(pairs)
    }
}

impl From<FieldMapping> for Vec<FieldPair> {
    fn from(mapping: FieldMapping) -> Self {
        mapping.pairs
    }
}

impl<'a> IntoIterator for &'a FieldMapping {
    type Item = &'a FieldPair;
    type IntoIter = std::slice::Iter<'a, FieldPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lists_rejects_length_mismatch() {
        let err = FieldMapping::from_lists(&["title", "year"], &["片名"]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MappingLengthMismatch { base: 2, target: 1 }
        );
    }

    #[test]
    fn from_lists_rejects_empty() {
        let empty: [&str; 0] = [];
        let err = FieldMapping::from_lists(&empty, &empty).unwrap_err();
        assert_eq!(err, ConfigError::EmptyMapping);
    }

    #[test]
    fn from_lists_keeps_order() {
        let mapping = FieldMapping::from_lists(&["title", "director"], &["片名", "导演"]).unwrap();
        let labels: Vec<String> = mapping.iter().map(FieldPair::label).collect();
        assert_eq!(labels, vec!["title≠片名", "director≠导演"]);
    }

    #[test]
    fn parse_pair_text() {
        assert_eq!(
            FieldPair::parse("title = 片名"),
            Some(FieldPair::new("title", "片名"))
        );
        assert_eq!(FieldPair::parse("year"), Some(FieldPair::new("year", "year")));
        assert_eq!(FieldPair::parse("title="), None);
        assert_eq!(FieldPair::parse("  "), None);
    }
}
