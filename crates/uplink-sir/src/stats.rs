//! Summary statistics over SIR samples
//!
//! All dB figures are per-snapshot `10·log10(SIR)`. `mean_sir_db` averages
//! those dB values; `linear_mean_db` is the dB value of the linear mean,
//! which is dominated by a few very good snapshots.

use crate::sir::SirSample;
use crate::to_db;
use serde::{Deserialize, Serialize};

/// Linear-interpolated percentile of an ascending slice (`p` in [0, 100])
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    if lo == hi || frac == 0.0 || sorted[lo] == sorted[hi] {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

/// Fraction of samples with `SIR_dB ≥ threshold_db`; `+∞` counts as covered
pub fn coverage_probability(samples: &[SirSample], threshold_db: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let covered = samples.iter().filter(|s| s.db() >= threshold_db).count();
    covered as f64 / samples.len() as f64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SirStatistics {
    pub count: usize,
    pub interference_free: usize,
    pub mean_sir_linear: f64,
    pub mean_sir_db: f64,
    pub linear_mean_db: f64,
    pub median_sir_db: f64,
    pub p5_sir_db: f64,
    pub p95_sir_db: f64,
    pub coverage_threshold_db: f64,
    pub coverage_probability: f64,
}

impl SirStatistics {
    /// `None` for an empty sample set
    pub fn from_samples(samples: &[SirSample], threshold_db: f64) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;

        let mut db: Vec<f64> = samples.iter().map(|s| s.db()).collect();
        db.sort_by(|a, b| a.total_cmp(b));

        let mean_sir_linear = samples.iter().map(|s| s.linear()).sum::<f64>() / n;

        Some(Self {
            count: samples.len(),
            interference_free: samples.iter().filter(|s| s.is_interference_free()).count(),
            mean_sir_linear,
            mean_sir_db: db.iter().sum::<f64>() / n,
            linear_mean_db: to_db(mean_sir_linear),
            median_sir_db: percentile_sorted(&db, 50.0),
            p5_sir_db: percentile_sorted(&db, 5.0),
            p95_sir_db: percentile_sorted(&db, 95.0),
            coverage_threshold_db: threshold_db,
            coverage_probability: coverage_probability(samples, threshold_db),
        })
    }
}

/// Equal-width histogram over the finite values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Histogram {
    pub bin_edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// Normalised so that Σ density·width = 1
    pub density: Vec<f64>,
    /// Non-finite values left out of the bins
    pub excluded: usize,
}

impl Histogram {
    /// `None` when `bins == 0` or no value is finite
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if bins == 0 || finite.is_empty() {
            return None;
        }

        let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            min -= 0.5;
            max += 0.5;
        }
        let width = (max - min) / bins as f64;

        let mut counts = vec![0usize; bins];
        for v in &finite {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let total = finite.len() as f64;
        let density = counts.iter().map(|&c| c as f64 / (total * width)).collect();
        let bin_edges = (0..=bins).map(|i| min + i as f64 * width).collect();

        Some(Self {
            bin_edges,
            counts,
            density,
            excluded: values.len() - finite.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_db;

    fn samples_db(db: &[f64]) -> Vec<SirSample> {
        db.iter().map(|&d| SirSample::from_linear(from_db(d))).collect()
    }

    #[test]
    fn test_percentile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile_sorted(&v, 0.0), 1.0);
        assert_eq!(percentile_sorted(&v, 100.0), 4.0);
        assert!((percentile_sorted(&v, 50.0) - 2.5).abs() < 1e-12);
        assert!(percentile_sorted(&[], 50.0).is_nan());
    }

    #[test]
    fn test_percentile_with_infinity() {
        let v = [1.0, 2.0, f64::INFINITY];
        assert_eq!(percentile_sorted(&v, 50.0), 2.0);
        assert_eq!(percentile_sorted(&v, 100.0), f64::INFINITY);
    }

    #[test]
    fn test_coverage_probability() {
        let samples = samples_db(&[-10.0, -4.0, 0.0, 12.0]);
        assert!((coverage_probability(&samples, -5.0) - 0.75).abs() < 1e-12);
        assert_eq!(coverage_probability(&samples, 20.0), 0.0);
        assert_eq!(coverage_probability(&[], 0.0), 0.0);
    }

    #[test]
    fn test_statistics_means() {
        let samples = samples_db(&[0.0, 10.0, 20.0]);
        let stats = SirStatistics::from_samples(&samples, 5.0).unwrap();

        assert_eq!(stats.count, 3);
        assert!((stats.mean_sir_db - 10.0).abs() < 1e-9);
        assert!((stats.mean_sir_linear - 37.0).abs() < 1e-9);
        assert!((stats.linear_mean_db - to_db(37.0)).abs() < 1e-9);
        assert!((stats.median_sir_db - 10.0).abs() < 1e-9);
        assert!((stats.coverage_probability - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.interference_free, 0);
    }

    #[test]
    fn test_statistics_empty() {
        assert!(SirStatistics::from_samples(&[], 0.0).is_none());
    }

    #[test]
    fn test_histogram_counts() {
        let values = [0.0, 0.1, 0.9, 1.0, f64::INFINITY];
        let hist = Histogram::from_values(&values, 2).unwrap();

        assert_eq!(hist.counts, vec![2, 2]);
        assert_eq!(hist.excluded, 1);
        assert_eq!(hist.bin_edges.len(), 3);

        let width = hist.bin_edges[1] - hist.bin_edges[0];
        let area: f64 = hist.density.iter().map(|d| d * width).sum();
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_degenerate() {
        assert!(Histogram::from_values(&[f64::INFINITY], 10).is_none());
        assert!(Histogram::from_values(&[1.0], 0).is_none());

        let hist = Histogram::from_values(&[3.0, 3.0], 4).unwrap();
        assert_eq!(hist.counts.iter().sum::<usize>(), 2);
    }
}
