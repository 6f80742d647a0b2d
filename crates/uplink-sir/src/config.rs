//! Simulation configuration
//!
//! [`EngineConfig`] holds the physical parameters consumed by the snapshot
//! engine; [`SimConfig`] wraps it with driver-level settings (snapshot count,
//! seed, rate and statistics parameters). Both load from JSON with defaults
//! for missing fields and are validated once before any snapshot runs.

use crate::cochannel::ReuseFactor;
use crate::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Macrocell radius (m)
pub const DEFAULT_CELL_RADIUS_M: f64 = 1000.0;
/// Path-loss exponent ν
pub const DEFAULT_PATH_LOSS_EXPONENT: f64 = 3.8;
/// Shadow fading σ (dB)
pub const DEFAULT_SHADOW_STD_DB: f64 = 8.0;
pub const DEFAULT_POWER_CONTROL_EXPONENT: f64 = 0.0;
pub const DEFAULT_NUM_SNAPSHOTS: usize = 150;
/// System bandwidth before reuse partitioning (Hz)
pub const DEFAULT_BANDWIDTH_HZ: f64 = 1e6;
pub const DEFAULT_SNR_GAP_DB: f64 = 0.0;
pub const DEFAULT_COVERAGE_THRESHOLD_DB: f64 = -5.0;
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

/// Physical parameters of one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub cell_radius_m: f64,
    pub path_loss_exponent: f64,
    pub shadow_fading_std_db: f64,
    pub reuse_factor: ReuseFactor,
    /// Fractional power-control exponent ε, expected in [0, 1]
    pub power_control_exponent: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cell_radius_m: DEFAULT_CELL_RADIUS_M,
            path_loss_exponent: DEFAULT_PATH_LOSS_EXPONENT,
            shadow_fading_std_db: DEFAULT_SHADOW_STD_DB,
            reuse_factor: ReuseFactor::One,
            power_control_exponent: DEFAULT_POWER_CONTROL_EXPONENT,
        }
    }
}

impl EngineConfig {
    pub fn with_reuse(&self, reuse_factor: ReuseFactor) -> Self {
        Self {
            reuse_factor,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require(
            "cell_radius_m",
            self.cell_radius_m,
            self.cell_radius_m.is_finite() && self.cell_radius_m > 0.0,
            "must be positive and finite",
        )?;
        require(
            "path_loss_exponent",
            self.path_loss_exponent,
            self.path_loss_exponent.is_finite() && self.path_loss_exponent > 0.0,
            "must be positive and finite",
        )?;
        require(
            "shadow_fading_std_db",
            self.shadow_fading_std_db,
            self.shadow_fading_std_db.is_finite() && self.shadow_fading_std_db >= 0.0,
            "must be non-negative and finite",
        )?;
        require(
            "power_control_exponent",
            self.power_control_exponent,
            (0.0..=1.0).contains(&self.power_control_exponent),
            "must lie in [0, 1]",
        )?;
        Ok(())
    }
}

/// Full run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub engine: EngineConfig,
    pub num_snapshots: usize,
    /// Master seed; drawn at setup when absent
    pub seed: Option<u64>,
    pub bandwidth_hz: f64,
    /// SNR gap Γ to Shannon capacity (dB)
    pub snr_gap_db: f64,
    pub coverage_threshold_db: f64,
    pub histogram_bins: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            num_snapshots: DEFAULT_NUM_SNAPSHOTS,
            seed: None,
            bandwidth_hz: DEFAULT_BANDWIDTH_HZ,
            snr_gap_db: DEFAULT_SNR_GAP_DB,
            coverage_threshold_db: DEFAULT_COVERAGE_THRESHOLD_DB,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl SimConfig {
    /// Load from a JSON file; absent fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from {:?}", path);
        let file = File::open(path)?;
        let config: SimConfig = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        if self.num_snapshots == 0 {
            return Err(SimError::NoSnapshots);
        }
        require(
            "bandwidth_hz",
            self.bandwidth_hz,
            self.bandwidth_hz.is_finite() && self.bandwidth_hz > 0.0,
            "must be positive and finite",
        )?;
        require(
            "snr_gap_db",
            self.snr_gap_db,
            self.snr_gap_db.is_finite(),
            "must be finite",
        )?;
        require(
            "coverage_threshold_db",
            self.coverage_threshold_db,
            !self.coverage_threshold_db.is_nan(),
            "must be a number",
        )?;
        require(
            "histogram_bins",
            self.histogram_bins as f64,
            self.histogram_bins > 0,
            "must be positive",
        )?;
        Ok(())
    }
}

fn require(name: &'static str, value: f64, ok: bool, reason: &'static str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(SimError::InvalidParameter {
            name,
            value,
            reason,
        })
    }
}
