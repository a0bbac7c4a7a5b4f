//! Distributional summary of a numeric sample.
//!
//! Reduces a variable-length sequence of values to the fixed set of
//! statistics used for every per-user feature column: quartiles, spread,
//! and shape. Statistics that need a minimum sample size are `Option` so
//! an undefined value can never leak downstream as a silent 0 or NaN.

/// Fixed set of distribution statistics computed for one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// max - min
    pub range: f64,
    /// q3 - q1
    pub iqr: f64,
    /// Sample standard deviation (n - 1 denominator). Needs n >= 2.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Adjusted Fisher-Pearson skewness. Needs n >= 3 and nonzero variance.
    pub skewness: Option<f64>,
}

/// Statistic suffixes in the order they appear in exported feature names.
pub const STATISTIC_NAMES: &[&str] = &[
    "q1", "median", "q3", "range", "iqr", "std_dev", "min", "max", "mean", "skewness",
];

impl DistributionSummary {
    /// Look up a statistic by its suffix name. `None` for an undefined
    /// statistic or an unknown name.
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "q1" => Some(self.q1),
            "median" => Some(self.median),
            "q3" => Some(self.q3),
            "range" => Some(self.range),
            "iqr" => Some(self.iqr),
            "std_dev" => self.std_dev,
            "min" => Some(self.min),
            "max" => Some(self.max),
            "mean" => Some(self.mean),
            "skewness" => self.skewness,
            _ => None,
        }
    }
}

/// Summarize a sample. Returns `None` for an empty sample; a single value
/// yields zero spread and that value for every location statistic.
pub fn summarize(values: &[f64]) -> Option<DistributionSummary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let min = sorted[0];
    let max = sorted[n - 1];
    let mean = sorted.iter().sum::<f64>() / n as f64;

    let std_dev = if n >= 2 {
        let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        Some(var.sqrt())
    } else {
        None
    };

    Some(DistributionSummary {
        q1,
        median,
        q3,
        range: max - min,
        iqr: q3 - q1,
        std_dev,
        min,
        max,
        mean,
        skewness: skewness(&sorted, mean),
    })
}

/// Interpolated quantile over an already-sorted sample, `q` in [0, 1].
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = pos - lower as f64;
        sorted[lower] + frac * (sorted[upper] - sorted[lower])
    }
}

/// Adjusted Fisher-Pearson skewness: g1 * sqrt(n(n-1)) / (n-2).
///
/// Undefined for n < 3 or a zero-variance sample; the caller treats an
/// undefined statistic as a missing value, never as 0.
fn skewness(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    let nf = n as f64;
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / nf;
    let m3 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / nf;
    if m2 <= 0.0 {
        return None;
    }
    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_equals_max_minus_min() {
        let s = summarize(&[3.0, 1.0, 4.0, 1.5, 9.0, 2.6]).unwrap();
        assert!((s.range - (s.max - s.min)).abs() < 1e-12);
        assert!(s.q1 <= s.median && s.median <= s.q3);
    }

    #[test]
    fn test_constant_sequence() {
        let s = summarize(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(s.std_dev, Some(0.0));
        assert_eq!(s.skewness, None, "zero-variance skewness is undefined");
        assert_eq!(s.iqr, 0.0);
        assert_eq!(s.range, 0.0);
        assert_eq!(s.median, 5.0);
    }

    #[test]
    fn test_single_value() {
        let s = summarize(&[7.5]).unwrap();
        assert_eq!(s.min, 7.5);
        assert_eq!(s.max, 7.5);
        assert_eq!(s.mean, 7.5);
        assert_eq!(s.q1, 7.5);
        assert_eq!(s.q3, 7.5);
        assert_eq!(s.range, 0.0);
        assert_eq!(s.iqr, 0.0);
        assert_eq!(s.std_dev, None, "std_dev needs two values");
        assert_eq!(s.skewness, None);
    }

    #[test]
    fn test_empty_sample() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn test_interpolated_quartiles() {
        // Quartiles of 1..=4 with linear interpolation.
        let s = summarize(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((s.q1 - 1.75).abs() < 1e-12);
        assert!((s.median - 2.5).abs() < 1e-12);
        assert!((s.q3 - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_right_skewed_sample_has_positive_skewness() {
        let s = summarize(&[1.0, 1.0, 1.0, 2.0, 10.0]).unwrap();
        assert!(s.skewness.unwrap() > 0.0);
    }

    #[test]
    fn test_statistic_lookup_matches_fields() {
        let s = summarize(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(s.get("mean"), Some(2.0));
        assert_eq!(s.get("std_dev"), s.std_dev);
        assert_eq!(s.get("nope"), None);
    }
}
