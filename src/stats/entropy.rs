//! Normalized Shannon entropy of a label multiset.
//!
//! Used for the artist-diversity score: 0 means every track shares one
//! artist, 1 means the listening is spread evenly over distinct artists.

use std::collections::HashMap;

/// Shannon entropy of the label-frequency distribution, normalized by
/// ln(distinct labels) so the result lies in [0, 1].
///
/// A single distinct label has no diversity and returns 0 rather than
/// dividing by ln(1).
pub fn normalized_entropy<S: AsRef<str>>(labels: &[S]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label.as_ref()).or_insert(0) += 1;
    }

    let distinct = counts.len();
    if distinct <= 1 {
        return 0.0;
    }

    let total = labels.len() as f64;
    let raw: f64 = counts
        .values()
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.ln()
        })
        .sum();

    raw / (distinct as f64).ln()
}
