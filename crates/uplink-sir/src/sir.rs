//! SIR aggregation for one snapshot
//!
//! `Init → SignalComputed → InterferenceAccumulated → Done`:
//! locate the victim at (cell 0, sector 0), compute its own-link received
//! power, add every co-channel interferer's power as heard at site 0, then
//! divide. An empty interferer set yields `+∞`.
//!
//! Snapshots share nothing but the immutable engine, so the same
//! [`SirEngine`] can be evaluated from many threads at once.

use crate::channel::ChannelModel;
use crate::config::EngineConfig;
use crate::geometry::{generate_grid, sample_all_users, BaseStationGrid, UserSnapshot};
use crate::link_budget::LinkBudget;
use crate::{to_db, Result, VICTIM_CELL, VICTIM_SECTOR};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Linear-domain SIR of one snapshot. Always ≥ 0, `+∞` exactly when no
/// interferer was selected.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SirSample(f64);

impl SirSample {
    /// Wrap a linear SIR; negative or NaN inputs become 0
    pub fn from_linear(linear: f64) -> Self {
        if linear > 0.0 {
            Self(linear)
        } else {
            Self(0.0)
        }
    }

    pub fn linear(self) -> f64 {
        self.0
    }

    pub fn db(self) -> f64 {
        to_db(self.0)
    }

    pub fn is_interference_free(self) -> bool {
        self.0 == f64::INFINITY
    }
}

/// Running signal / interference totals for one snapshot
#[derive(Debug, Clone, Copy)]
pub struct SirAccumulator {
    signal: f64,
    interference: f64,
    interferers: usize,
}

impl SirAccumulator {
    pub fn with_signal(signal: f64) -> Self {
        Self {
            signal,
            interference: 0.0,
            interferers: 0,
        }
    }

    pub fn add_interference(&mut self, power: f64) {
        self.interference += power;
        self.interferers += 1;
    }

    pub fn signal(&self) -> f64 {
        self.signal
    }

    pub fn interference(&self) -> f64 {
        self.interference
    }

    pub fn interferers(&self) -> usize {
        self.interferers
    }

    /// `+∞` only when no interferer was added. An interference sum that
    /// underflowed to zero is floored at the smallest normal `f64`, and the
    /// ratio is capped at `f64::MAX`.
    pub fn finish(self) -> SirSample {
        if self.interferers == 0 {
            return SirSample(f64::INFINITY);
        }
        let ratio = self.signal / self.interference.max(f64::MIN_POSITIVE);
        if ratio.is_nan() {
            SirSample(0.0)
        } else {
            SirSample(ratio.min(f64::MAX))
        }
    }
}

/// Snapshot engine: fixed grid, channel and power-control settings
#[derive(Debug, Clone)]
pub struct SirEngine {
    config: EngineConfig,
    grid: BaseStationGrid,
    channel: ChannelModel,
}

impl SirEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let channel = ChannelModel::new(config.path_loss_exponent, config.shadow_fading_std_db)?;
        let grid = generate_grid(config.cell_radius_m);

        Ok(Self {
            config,
            grid,
            channel,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &BaseStationGrid {
        &self.grid
    }

    pub fn channel(&self) -> &ChannelModel {
        &self.channel
    }

    /// Draw users and evaluate one full snapshot
    pub fn snapshot_sir<R: Rng + ?Sized>(&self, rng: &mut R) -> SirSample {
        let users = sample_all_users(rng, &self.grid);
        self.evaluate(&users, rng)
    }

    /// SIR of a given placement under the configured reuse factor
    pub fn evaluate<R: Rng + ?Sized>(&self, users: &UserSnapshot, rng: &mut R) -> SirSample {
        let reuse = self.config.reuse_factor;
        self.evaluate_with(users, rng, |cell, sector| reuse.is_co_channel(cell, sector))
    }

    /// SIR of a given placement with a caller-supplied co-channel predicate.
    ///
    /// The victim pair is skipped regardless of what `is_co_channel` says.
    pub fn evaluate_with<R, F>(&self, users: &UserSnapshot, rng: &mut R, is_co_channel: F) -> SirSample
    where
        R: Rng + ?Sized,
        F: Fn(usize, usize) -> bool,
    {
        let victim_site = self.grid.center(VICTIM_CELL);
        let eps = self.config.power_control_exponent;

        let victim = LinkBudget::evaluate(
            users.position(VICTIM_CELL, VICTIM_SECTOR),
            victim_site,
            victim_site,
            &self.channel,
            eps,
            rng,
        );
        let mut acc = SirAccumulator::with_signal(victim.received_power());

        for (cell, sector, position) in users.iter() {
            if (cell, sector) == (VICTIM_CELL, VICTIM_SECTOR) || !is_co_channel(cell, sector) {
                continue;
            }
            let link = LinkBudget::evaluate(
                position,
                self.grid.center(cell),
                victim_site,
                &self.channel,
                eps,
                rng,
            );
            acc.add_interference(link.received_power());
        }

        debug!(
            "snapshot: signal={:.3e} interference={:.3e} from {} interferers",
            acc.signal(),
            acc.interference(),
            acc.interferers()
        );
        acc.finish()
    }
}
