//! Pairwise correlation engine over two sets of numeric columns.
//!
//! For every (column A, column B) pair the engine drops rows where either
//! value is missing, gates on degeneracy and minimum paired sample size,
//! then computes the selected coefficient and its p-value. Pairs are
//! independent, so the cartesian product is evaluated as a parallel map.
//!
//! Closed-form significance uses `statrs` distributions; the distance
//! correlation has no closed form and uses a seeded permutation test.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};
use tracing::debug;

/// One numeric column: a name plus row-aligned values, `None` for missing.
#[derive(Debug, Clone)]
pub struct NumericColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl NumericColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        NumericColumn { name: name.into(), values }
    }

    /// A column with fewer than 2 distinct defined values carries no
    /// information and is excluded from correlation entirely.
    pub fn is_degenerate(&self) -> bool {
        let mut first: Option<f64> = None;
        for v in self.values.iter().flatten() {
            match first {
                None => first = Some(*v),
                Some(f) if (f - v).abs() > f64::EPSILON => return false,
                Some(_) => {}
            }
        }
        true
    }
}

/// Correlation methods supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationMethod {
    /// Linear correlation, p-value from the t distribution.
    Pearson,
    /// Rank-based monotonic correlation, p-value from the t distribution.
    Spearman,
    /// Rank concordance (tau-b), p-value from the normal approximation.
    KendallTau,
    /// Nonlinear dependence measure, p-value from a permutation test.
    Distance,
}

impl CorrelationMethod {
    pub fn name(&self) -> &'static str {
        match self {
            CorrelationMethod::Pearson => "pearson",
            CorrelationMethod::Spearman => "spearman",
            CorrelationMethod::KendallTau => "kendall",
            CorrelationMethod::Distance => "distance",
        }
    }
}

/// One correlation result for a (column A, column B) pair that passed
/// the degeneracy and sample-size gates.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CorrelationRecord {
    pub metric_a: String,
    pub metric_b: String,
    pub correlation: f64,
    pub p_value: f64,
}

/// Engine tunables, supplied by configuration rather than hardcoded.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationSettings {
    /// Minimum paired, non-missing sample size for a pair to be computed.
    pub min_sample_size: usize,
    /// Resample count for the distance-correlation permutation test.
    pub permutation_resamples: usize,
    /// Base RNG seed for the permutation test, for reproducible runs.
    pub rng_seed: u64,
}

impl Default for CorrelationSettings {
    fn default() -> Self {
        CorrelationSettings {
            min_sample_size: 10,
            permutation_resamples: 1000,
            rng_seed: 42,
        }
    }
}

/// Correlate every column of `a` against every column of `b`.
///
/// Pair decisions are pure functions of the two columns, so the cartesian
/// product runs as a parallel map; results come back sorted by name pair
/// so the output does not depend on scheduling.
pub fn correlate(
    a: &[NumericColumn],
    b: &[NumericColumn],
    method: CorrelationMethod,
    settings: &CorrelationSettings,
) -> Vec<CorrelationRecord> {
    let pairs: Vec<(usize, usize)> = (0..a.len())
        .flat_map(|i| (0..b.len()).map(move |j| (i, j)))
        .collect();

    let mut records: Vec<CorrelationRecord> = pairs
        .par_iter()
        .filter_map(|&(i, j)| {
            correlate_pair(&a[i], &b[j], method, settings, (i * b.len() + j) as u64)
        })
        .collect();

    records.sort_by(|x, y| {
        (x.metric_a.as_str(), x.metric_b.as_str()).cmp(&(y.metric_a.as_str(), y.metric_b.as_str()))
    });
    records
}

/// Keep only records with |coefficient| >= `min_coefficient` and
/// p-value <= `max_p_value`. Applied at analysis time so every exported
/// "significant" table is already filtered.
pub fn filter_significant(
    records: Vec<CorrelationRecord>,
    min_coefficient: f64,
    max_p_value: f64,
) -> Vec<CorrelationRecord> {
    records
        .into_iter()
        .filter(|r| r.correlation.abs() >= min_coefficient && r.p_value <= max_p_value)
        .collect()
}

fn correlate_pair(
    col_a: &NumericColumn,
    col_b: &NumericColumn,
    method: CorrelationMethod,
    settings: &CorrelationSettings,
    pair_index: u64,
) -> Option<CorrelationRecord> {
    if col_a.is_degenerate() || col_b.is_degenerate() {
        return None;
    }

    // Pairwise deletion: keep rows where both values are defined.
    let (x, y): (Vec<f64>, Vec<f64>) = col_a
        .values
        .iter()
        .zip(&col_b.values)
        .filter_map(|(va, vb)| match (va, vb) {
            (Some(a), Some(b)) => Some((*a, *b)),
            _ => None,
        })
        .unzip();

    if x.len() < settings.min_sample_size {
        debug!(
            metric_a = %col_a.name,
            metric_b = %col_b.name,
            paired = x.len(),
            "pair below minimum sample size, skipped"
        );
        return None;
    }

    let (correlation, p_value) = match method {
        CorrelationMethod::Pearson => pearson(&x, &y)?,
        CorrelationMethod::Spearman => spearman(&x, &y)?,
        CorrelationMethod::KendallTau => kendall_tau(&x, &y)?,
        CorrelationMethod::Distance => {
            // Per-pair seed keeps results independent of scheduling order.
            let seed = settings.rng_seed.wrapping_add(pair_index);
            distance_correlation(&x, &y, settings.permutation_resamples, seed)?
        }
    };

    debug!(
        metric_a = %col_a.name,
        metric_b = %col_b.name,
        method = method.name(),
        correlation,
        "pair computed"
    );

    Some(CorrelationRecord {
        metric_a: col_a.name.clone(),
        metric_b: col_b.name.clone(),
        correlation,
        p_value,
    })
}

/// Pearson r with a two-sided p-value from the t distribution with
/// n - 2 degrees of freedom.
fn pearson(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let r = pearson_coefficient(x, y)?;
    Some((r, t_test_p_value(r, x.len())))
}

fn pearson_coefficient(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// Spearman rho: Pearson on tie-averaged ranks, same t-form p-value.
fn spearman(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let rx = average_ranks(x);
    let ry = average_ranks(y);
    let rho = pearson_coefficient(&rx, &ry)?;
    Some((rho, t_test_p_value(rho, x.len())))
}

/// Ranks starting at 1, ties receiving the average of their positions.
fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| values[i].partial_cmp(&values[j]).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && (values[order[j + 1]] - values[order[i]]).abs() <= f64::EPSILON {
            j += 1;
        }
        let avg = (i + j) as f64 / 2.0 + 1.0;
        for k in i..=j {
            ranks[order[k]] = avg;
        }
        i = j + 1;
    }
    ranks
}

fn t_test_p_value(r: f64, n: usize) -> f64 {
    if n < 3 {
        return 1.0;
    }
    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= f64::EPSILON {
        // |r| is numerically 1; the null is as rejected as it gets.
        return 0.0;
    }
    let t = r * (df / denom).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0),
        Err(_) => 1.0,
    }
}

/// Kendall tau-b with tie correction in the denominator; p-value from the
/// standard normal approximation of the tau statistic.
fn kendall_tau(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let n = x.len();
    let mut concordant = 0i64;
    let mut discordant = 0i64;
    let mut ties_x = 0i64;
    let mut ties_y = 0i64;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[i] - x[j];
            let dy = y[i] - y[j];
            let tie_x = dx.abs() <= f64::EPSILON;
            let tie_y = dy.abs() <= f64::EPSILON;
            match (tie_x, tie_y) {
                (true, true) => {}
                (true, false) => ties_x += 1,
                (false, true) => ties_y += 1,
                (false, false) => {
                    if dx * dy > 0.0 {
                        concordant += 1;
                    } else {
                        discordant += 1;
                    }
                }
            }
        }
    }

    let n0 = (n * (n - 1) / 2) as f64;
    let denom = ((n0 - ties_x as f64) * (n0 - ties_y as f64)).sqrt();
    if denom <= 0.0 {
        return None;
    }
    let tau = ((concordant - discordant) as f64 / denom).clamp(-1.0, 1.0);

    let nf = n as f64;
    let var = 2.0 * (2.0 * nf + 5.0) / (9.0 * nf * (nf - 1.0));
    let z = tau / var.sqrt();
    let p = match Normal::new(0.0, 1.0) {
        Ok(dist) => (2.0 * (1.0 - dist.cdf(z.abs()))).clamp(0.0, 1.0),
        Err(_) => 1.0,
    };
    Some((tau, p))
}

/// Distance correlation with a permutation-test p-value.
///
/// The test statistic is n * dCov^2; the p-value is the fraction of joint
/// row/column permutations of the centered distance matrix producing a
/// statistic at least as large, with the +1 correction so p is never 0.
fn distance_correlation(x: &[f64], y: &[f64], resamples: usize, seed: u64) -> Option<(f64, f64)> {
    let n = x.len();
    let a = centered_distance_matrix(x);
    let b = centered_distance_matrix(y);

    let dcov2 = matrix_inner_mean(&a, &b, n, None);
    let dvar_x = matrix_inner_mean(&a, &a, n, None);
    let dvar_y = matrix_inner_mean(&b, &b, n, None);

    if dvar_x <= 0.0 || dvar_y <= 0.0 {
        return None;
    }
    let dcor = (dcov2.max(0.0) / (dvar_x * dvar_y).sqrt()).sqrt();

    let observed = n as f64 * dcov2;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut perm: Vec<usize> = (0..n).collect();
    let mut exceed = 0usize;

    for _ in 0..resamples {
        perm.shuffle(&mut rng);
        let stat = n as f64 * matrix_inner_mean(&a, &b, n, Some(&perm));
        if stat >= observed {
            exceed += 1;
        }
    }

    let p = (exceed + 1) as f64 / (resamples + 1) as f64;
    Some((dcor, p))
}

/// Double-centered pairwise absolute-distance matrix, stored row-major.
fn centered_distance_matrix(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut d = vec![0.0; n * n];
    let mut row_means = vec![0.0; n];
    let mut grand = 0.0;

    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..n {
            let dist = (values[i] - values[j]).abs();
            d[i * n + j] = dist;
            sum += dist;
        }
        row_means[i] = sum / n as f64;
        grand += sum;
    }
    grand /= (n * n) as f64;

    // The distance matrix is symmetric, so column means equal row means.
    for i in 0..n {
        for j in 0..n {
            d[i * n + j] -= row_means[i] + row_means[j] - grand;
        }
    }
    d
}

/// Mean of the elementwise product of two n x n matrices, optionally
/// applying a joint row/column permutation to the second.
fn matrix_inner_mean(a: &[f64], b: &[f64], n: usize, perm: Option<&[usize]>) -> f64 {
    let mut sum = 0.0;
    match perm {
        None => {
            for (va, vb) in a.iter().zip(b) {
                sum += va * vb;
            }
        }
        Some(p) => {
            for i in 0..n {
                for j in 0..n {
                    sum += a[i * n + j] * b[p[i] * n + p[j]];
                }
            }
        }
    }
    sum / (n * n) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str, values: &[f64]) -> NumericColumn {
        NumericColumn::new(name, values.iter().map(|v| Some(*v)).collect())
    }

    fn settings(min: usize) -> CorrelationSettings {
        CorrelationSettings {
            min_sample_size: min,
            permutation_resamples: 200,
            rng_seed: 7,
        }
    }

    #[test]
    fn test_perfect_linear_relation() {
        let a = vec![col("x", &[1.0, 2.0, 3.0, 4.0, 5.0])];
        let b = vec![col("y", &[2.0, 4.0, 6.0, 8.0, 10.0])];

        let pearson = correlate(&a, &b, CorrelationMethod::Pearson, &settings(5));
        assert_eq!(pearson.len(), 1);
        assert!((pearson[0].correlation - 1.0).abs() < 1e-9);
        assert!(pearson[0].p_value < 0.01);

        let spearman = correlate(&a, &b, CorrelationMethod::Spearman, &settings(5));
        assert!((spearman[0].correlation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_column_never_appears() {
        let a = vec![col("const", &[3.0, 3.0, 3.0, 3.0, 3.0])];
        let b = vec![col("y", &[1.0, 2.0, 3.0, 4.0, 5.0])];
        for method in [
            CorrelationMethod::Pearson,
            CorrelationMethod::Spearman,
            CorrelationMethod::KendallTau,
            CorrelationMethod::Distance,
        ] {
            assert!(
                correlate(&a, &b, method, &settings(2)).is_empty(),
                "degenerate column leaked through {}",
                method.name()
            );
        }
    }

    #[test]
    fn test_min_sample_size_gate() {
        let a = vec![col("x", &[1.0, 2.0, 3.0])];
        let b = vec![col("y", &[3.0, 1.0, 2.0])];
        assert!(correlate(&a, &b, CorrelationMethod::Pearson, &settings(4)).is_empty());
        assert_eq!(correlate(&a, &b, CorrelationMethod::Pearson, &settings(3)).len(), 1);
    }

    #[test]
    fn test_missing_rows_dropped_before_gate() {
        let a = vec![NumericColumn::new(
            "x",
            vec![Some(1.0), None, Some(3.0), Some(4.0), Some(5.0)],
        )];
        let b = vec![NumericColumn::new(
            "y",
            vec![Some(2.0), Some(4.0), None, Some(8.0), Some(10.0)],
        )];
        // Only 3 paired rows remain.
        assert!(correlate(&a, &b, CorrelationMethod::Pearson, &settings(4)).is_empty());
        let recs = correlate(&a, &b, CorrelationMethod::Pearson, &settings(3));
        assert_eq!(recs.len(), 1);
        assert!((recs[0].correlation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_kendall_perfect_monotonic() {
        let a = vec![col("x", &[1.0, 2.0, 3.0, 4.0, 5.0])];
        let b = vec![col("y", &[1.0, 4.0, 9.0, 16.0, 25.0])];
        let recs = correlate(&a, &b, CorrelationMethod::KendallTau, &settings(5));
        assert!((recs[0].correlation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_kendall_reversed() {
        let a = vec![col("x", &[1.0, 2.0, 3.0, 4.0, 5.0])];
        let b = vec![col("y", &[5.0, 4.0, 3.0, 2.0, 1.0])];
        let recs = correlate(&a, &b, CorrelationMethod::KendallTau, &settings(5));
        assert!((recs[0].correlation + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_correlation_detects_dependence() {
        // Strong nonlinear (quadratic) dependence over a symmetric domain,
        // where Pearson is near zero but distance correlation is not.
        let xs: Vec<f64> = (-10..=10).map(|v| v as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|v| v * v).collect();
        let a = vec![col("x", &xs)];
        let b = vec![col("y", &ys)];

        let pearson = correlate(&a, &b, CorrelationMethod::Pearson, &settings(10));
        assert!(pearson[0].correlation.abs() < 0.05);

        let distance = correlate(&a, &b, CorrelationMethod::Distance, &settings(10));
        assert!(distance[0].correlation > 0.3);
        // Stochastic p-value: assert threshold, not exact value.
        assert!(distance[0].p_value < 0.05);
    }

    #[test]
    fn test_distance_correlation_independent_data() {
        let xs: Vec<f64> = (0..30).map(|v| (v as f64 * 0.7).sin() * 13.0).collect();
        let ys: Vec<f64> = (0..30).map(|v| ((v * v) as f64 * 1.3).cos() * 5.0).collect();
        let a = vec![col("x", &xs)];
        let b = vec![col("y", &ys)];
        let recs = correlate(&a, &b, CorrelationMethod::Distance, &settings(10));
        assert_eq!(recs.len(), 1);
        assert!(recs[0].correlation >= 0.0 && recs[0].correlation <= 1.0);
        assert!(recs[0].p_value > 0.0);
    }

    #[test]
    fn test_distance_permutation_is_reproducible() {
        let xs: Vec<f64> = (0..20).map(|v| v as f64).collect();
        let ys: Vec<f64> = (0..20).map(|v| (v as f64 * 0.9).sin()).collect();
        let a = vec![col("x", &xs)];
        let b = vec![col("y", &ys)];
        let r1 = correlate(&a, &b, CorrelationMethod::Distance, &settings(10));
        let r2 = correlate(&a, &b, CorrelationMethod::Distance, &settings(10));
        assert_eq!(r1[0].p_value, r2[0].p_value, "same seed must give the same p-value");
    }

    #[test]
    fn test_cartesian_product_ordering() {
        let a = vec![col("b_col", &[1.0, 2.0, 3.0]), col("a_col", &[3.0, 1.0, 2.0])];
        let b = vec![col("y", &[1.0, 3.0, 2.0])];
        let recs = correlate(&a, &b, CorrelationMethod::Spearman, &settings(3));
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].metric_a, "a_col");
        assert_eq!(recs[1].metric_a, "b_col");
    }

    #[test]
    fn test_significance_filter() {
        let records = vec![
            CorrelationRecord {
                metric_a: "a".into(),
                metric_b: "b".into(),
                correlation: 0.9,
                p_value: 0.001,
            },
            CorrelationRecord {
                metric_a: "a".into(),
                metric_b: "c".into(),
                correlation: 0.1,
                p_value: 0.001,
            },
            CorrelationRecord {
                metric_a: "a".into(),
                metric_b: "d".into(),
                correlation: -0.8,
                p_value: 0.3,
            },
        ];
        let kept = filter_significant(records, 0.2, 0.05);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].metric_b, "b");
    }

    #[test]
    fn test_average_ranks_with_ties() {
        let ranks = average_ranks(&[10.0, 20.0, 20.0, 30.0]);
        assert_eq!(ranks, vec![1.0, 2.5, 2.5, 4.0]);
    }
}
