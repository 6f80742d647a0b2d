//! Uplink SIR Engine
//!
//! Monte-Carlo estimation of the uplink Signal-to-Interference Ratio seen by a
//! victim user in a 19-cell, 3-sector hexagonal network, under a choice of
//! frequency-reuse factor and fractional uplink power control.
//!
//! # Snapshot Model
//!
//! ```text
//! SIR = P(d₀)·G(d₀) / Σᵢ P(dᵢ,own)·G(dᵢ,victim)
//!
//! G(d) = max(d, 1)^(-ν) · 10^(X/10),   X ~ N(0, σ²)
//! P(d) = d^(ε·ν)
//! ```
//!
//! | Symbol | Meaning | Default |
//! |--------|---------|---------|
//! | R      | Cell radius (m) | 1000 |
//! | ν      | Path-loss exponent | 3.8 |
//! | σ      | Shadow fading std (dB) | 8 |
//! | N      | Reuse factor (1, 3, 9) | 1 |
//! | ε      | Power-control exponent | 0 |
//!
//! # Pipeline
//!
//! 1. [`geometry`] builds the fixed grid and draws one user per (cell, sector)
//! 2. [`link_budget`] pairs [`channel`] gain with [`power`] control per link
//! 3. [`cochannel`] filters the interferers for the reuse factor
//! 4. [`sir`] sums and divides into one [`SirSample`]
//!
//! [`runner`], [`stats`], [`rate`] and [`report`] turn samples into summaries.

use thiserror::Error;

pub mod channel;
pub mod cochannel;
pub mod config;
pub mod geometry;
pub mod link_budget;
pub mod power;
pub mod rate;
pub mod report;
pub mod runner;
pub mod sir;
pub mod stats;

pub use channel::ChannelModel;
pub use cochannel::{is_co_channel, ReuseFactor};
pub use config::{EngineConfig, SimConfig};
pub use geometry::{BaseStationGrid, UserSnapshot};
pub use link_budget::LinkBudget;
pub use runner::{MonteCarloRunner, ReuseSweep, SimulationRun};
pub use sir::{SirAccumulator, SirEngine, SirSample};

/// Number of sites in the two-ring layout (centre + 6 + 12)
pub const NUM_CELLS: usize = 19;

/// Sectors per site
pub const NUM_SECTORS: usize = 3;

/// Index of the victim's serving cell
pub const VICTIM_CELL: usize = 0;

/// Index of the victim's sector
pub const VICTIM_SECTOR: usize = 0;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported reuse factor {0}: expected 1, 3 or 9")]
    InvalidReuseFactor(u32),
    #[error("Invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("Shadow fading distribution rejected: {0}")]
    Distribution(#[from] rand_distr::NormalError),
    #[error("Snapshot count must be positive")]
    NoSnapshots,
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Convert a linear power ratio to dB
pub fn to_db(linear: f64) -> f64 {
    10.0 * linear.log10()
}

/// Convert dB to a linear power ratio
pub fn from_db(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}
