//! Tagged score values and explicit flattening of nested score maps.
//!
//! A scorer emits a tree of named values (sentiment sub-scores, readability
//! sub-scores, per-POS-tag ratios). Aggregation works on flat columns, so
//! the tree is flattened with `_`-joined keys by an explicit recursion over
//! the variant type rather than any runtime reflection.

use std::collections::BTreeMap;

/// One value in a score mapping. The numeric-vs-label distinction is a
/// type tag fixed at scorer-definition time.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreValue {
    Number(f64),
    Label(String),
    Map(BTreeMap<String, ScoreValue>),
    List(Vec<ScoreValue>),
}

/// A scalar cell after flattening.
#[derive(Debug, Clone, PartialEq)]
pub enum FlatValue {
    Number(f64),
    Label(String),
}

impl FlatValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FlatValue::Number(n) => Some(*n),
            FlatValue::Label(_) => None,
        }
    }
}

/// The flat result of scoring one item: feature name to scalar value.
pub type ScoreMap = BTreeMap<String, ScoreValue>;

/// Flatten a nested score map into `parent_child` keys.
///
/// Lists collapse to their first element (empty lists are dropped), the
/// behavior of the canonical revision of the message analyzer.
pub fn flatten(map: &ScoreMap) -> BTreeMap<String, FlatValue> {
    let mut out = BTreeMap::new();
    for (key, value) in map {
        flatten_into(key, value, &mut out);
    }
    out
}

fn flatten_into(key: &str, value: &ScoreValue, out: &mut BTreeMap<String, FlatValue>) {
    match value {
        ScoreValue::Number(n) => {
            out.insert(key.to_string(), FlatValue::Number(*n));
        }
        ScoreValue::Label(s) => {
            out.insert(key.to_string(), FlatValue::Label(s.clone()));
        }
        ScoreValue::Map(nested) => {
            for (child, v) in nested {
                let joined = format!("{key}_{child}");
                flatten_into(&joined, v, out);
            }
        }
        ScoreValue::List(items) => {
            if let Some(first) = items.first() {
                flatten_into(key, first, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: Vec<(&str, ScoreValue)>) -> ScoreMap {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_flatten_nested_map() {
        let score = map(vec![
            ("word_count", ScoreValue::Number(4.0)),
            (
                "pos_ratios",
                ScoreValue::Map(map(vec![
                    ("NN", ScoreValue::Number(0.5)),
                    ("VB", ScoreValue::Number(0.25)),
                ])),
            ),
        ]);
        let flat = flatten(&score);
        assert_eq!(flat["word_count"], FlatValue::Number(4.0));
        assert_eq!(flat["pos_ratios_NN"], FlatValue::Number(0.5));
        assert_eq!(flat["pos_ratios_VB"], FlatValue::Number(0.25));
    }

    #[test]
    fn test_flatten_two_levels() {
        let score = map(vec![(
            "outer",
            ScoreValue::Map(map(vec![(
                "inner",
                ScoreValue::Map(map(vec![("leaf", ScoreValue::Number(1.0))])),
            )])),
        )]);
        let flat = flatten(&score);
        assert_eq!(flat["outer_inner_leaf"], FlatValue::Number(1.0));
    }

    #[test]
    fn test_list_takes_first_element() {
        let score = map(vec![(
            "profanity_probability",
            ScoreValue::List(vec![ScoreValue::Number(0.8), ScoreValue::Number(0.1)]),
        )]);
        let flat = flatten(&score);
        assert_eq!(flat["profanity_probability"], FlatValue::Number(0.8));
    }

    #[test]
    fn test_empty_list_is_dropped() {
        let score = map(vec![("empty", ScoreValue::List(Vec::new()))]);
        assert!(flatten(&score).is_empty());
    }

    #[test]
    fn test_labels_survive_flattening() {
        let score = map(vec![("tag", ScoreValue::Label("chat".into()))]);
        assert_eq!(flatten(&score)["tag"], FlatValue::Label("chat".into()));
    }
}
