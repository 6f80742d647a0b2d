//! Bit-rate conversion
//!
//! Shannon capacity of a snapshot, and the reuse-aware throughput that splits
//! the band into N sub-bands and backs off by an SNR gap Γ.

use crate::cochannel::ReuseFactor;
use crate::from_db;
use crate::sir::SirSample;
use crate::stats::percentile_sorted;
use serde::{Deserialize, Serialize};

/// `bandwidth · log2(1 + sir)` (bps)
pub fn shannon_rate(sir: f64, bandwidth_hz: f64) -> f64 {
    bandwidth_hz * (1.0 + sir).log2()
}

/// `(bandwidth / N) · log2(1 + sir / Γ)` (bps)
pub fn throughput(sir: f64, bandwidth_hz: f64, reuse: ReuseFactor, snr_gap_db: f64) -> f64 {
    let gap = from_db(snr_gap_db);
    shannon_rate(sir / gap, bandwidth_hz / reuse.sub_bands() as f64)
}

/// Rates of a whole sample set
pub fn throughputs(
    samples: &[SirSample],
    bandwidth_hz: f64,
    reuse: ReuseFactor,
    snr_gap_db: f64,
) -> Vec<f64> {
    samples
        .iter()
        .map(|s| throughput(s.linear(), bandwidth_hz, reuse, snr_gap_db))
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThroughputSummary {
    pub bandwidth_hz: f64,
    /// Bandwidth left to one sector after reuse partitioning
    pub effective_bandwidth_hz: f64,
    pub snr_gap_db: f64,
    pub mean_bps: f64,
    pub median_bps: f64,
    /// Cell-edge rate
    pub p5_bps: f64,
}

impl ThroughputSummary {
    /// `None` for an empty sample set
    pub fn from_samples(
        samples: &[SirSample],
        bandwidth_hz: f64,
        reuse: ReuseFactor,
        snr_gap_db: f64,
    ) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut rates = throughputs(samples, bandwidth_hz, reuse, snr_gap_db);
        rates.sort_by(|a, b| a.total_cmp(b));
        let mean_bps = rates.iter().sum::<f64>() / rates.len() as f64;

        Some(Self {
            bandwidth_hz,
            effective_bandwidth_hz: bandwidth_hz / reuse.sub_bands() as f64,
            snr_gap_db,
            mean_bps,
            median_bps: percentile_sorted(&rates, 50.0),
            p5_bps: percentile_sorted(&rates, 5.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_rate_formula() {
        for sir in [0.0, 0.3, 1.0, 7.5, 1e6] {
            assert_eq!(shannon_rate(sir, 1e6), 1e6 * (1.0 + sir).log2());
        }
    }

    #[test]
    fn test_shannon_rate_edges() {
        assert_eq!(shannon_rate(0.0, 1e6), 0.0);
        assert_eq!(shannon_rate(f64::INFINITY, 1e6), f64::INFINITY);
        assert!((shannon_rate(1.0, 1e6) - 1e6).abs() < 1e-6);
    }

    #[test]
    fn test_throughput_splits_band() {
        let full = throughput(3.0, 9e6, ReuseFactor::One, 0.0);
        let ninth = throughput(3.0, 9e6, ReuseFactor::Nine, 0.0);
        assert!((full - 18e6).abs() < 1e-3);
        assert!((ninth - 2e6).abs() < 1e-3);
    }

    #[test]
    fn test_snr_gap_lowers_rate() {
        let ideal = throughput(15.0, 1e6, ReuseFactor::Three, 0.0);
        let gapped = throughput(15.0, 1e6, ReuseFactor::Three, 3.0);
        assert!(gapped < ideal);
    }

    #[test]
    fn test_summary_empty() {
        assert!(ThroughputSummary::from_samples(&[], 1e6, ReuseFactor::One, 0.0).is_none());
    }
}
