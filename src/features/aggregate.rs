//! Per-user feature aggregation.
//!
//! Scores every item of a user independently, flattens the nested score
//! maps, and reduces each numeric column to its distribution statistics,
//! producing one fixed-width feature record per user. Items carry no
//! shared mutable state, so scoring runs as a parallel map and the result
//! does not depend on item order.

use rayon::prelude::*;
use std::collections::BTreeMap;

use super::value::{flatten, FlatValue, ScoreMap};
use crate::stats::summarize;

/// One user's aggregated features: `{field}_{statistic}` columns plus the
/// scored item count. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UserFeatureRecord {
    pub id: String,
    pub item_count: usize,
    pub features: BTreeMap<String, f64>,
}

/// Aggregation tunables.
#[derive(Debug, Clone, Copy)]
pub struct AggregateOptions {
    /// Minimum defined values a field needs before its statistics are
    /// reported. Below this the field is omitted, never zero-filled.
    pub min_field_sample: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        AggregateOptions { min_field_sample: 1 }
    }
}

/// Score all items with `score` (a `None` result means the item is skipped,
/// not treated as zero) and aggregate the score maps.
pub fn aggregate_items<I, F>(
    id: &str,
    items: &[I],
    score: F,
    options: &AggregateOptions,
) -> UserFeatureRecord
where
    I: Sync,
    F: Fn(&I) -> Option<ScoreMap> + Sync,
{
    let score_maps: Vec<ScoreMap> = items.par_iter().filter_map(|item| score(item)).collect();
    aggregate_score_maps(id, &score_maps, options)
}

/// Aggregate already-scored items into one feature record.
pub fn aggregate_score_maps(
    id: &str,
    score_maps: &[ScoreMap],
    options: &AggregateOptions,
) -> UserFeatureRecord {
    // Column assembly: a field absent for one item is a missing value for
    // that item, so columns only collect defined entries.
    let mut columns: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for score_map in score_maps {
        for (key, value) in flatten(score_map) {
            if let FlatValue::Number(n) = value {
                columns.entry(key).or_default().push(n);
            }
        }
    }

    let min_sample = options.min_field_sample.max(1);
    let mut features = BTreeMap::new();
    for (name, values) in &columns {
        if values.len() < min_sample {
            continue;
        }
        if let Some(summary) = summarize(values) {
            for &stat in crate::stats::STATISTIC_NAMES {
                if let Some(v) = summary.get(stat) {
                    features.insert(format!("{name}_{stat}"), v);
                }
            }
        }
    }

    UserFeatureRecord {
        id: id.to_string(),
        item_count: score_maps.len(),
        features,
    }
}
