//! Monte-Carlo driver
//!
//! Snapshots are independent, so they run on the rayon pool. Snapshot `i` of
//! master seed `s` always draws from `ChaCha8Rng::seed_from_u64(s)` on stream
//! `i`, which makes every sample reproducible regardless of thread count or
//! scheduling order.

use crate::cochannel::ReuseFactor;
use crate::config::SimConfig;
use crate::sir::{SirEngine, SirSample};
use crate::stats::SirStatistics;
use crate::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{info, warn};

/// Progress is logged every this many completed snapshots
pub const PROGRESS_INTERVAL: usize = 1000;

/// Generator for snapshot `index` under master seed `seed`
pub fn snapshot_rng(seed: u64, index: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index);
    rng
}

/// Samples from one configuration, in snapshot order
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub reuse_factor: ReuseFactor,
    pub seed: u64,
    pub samples: Vec<SirSample>,
}

impl SimulationRun {
    pub fn statistics(&self, threshold_db: f64) -> Option<SirStatistics> {
        SirStatistics::from_samples(&self.samples, threshold_db)
    }
}

pub struct MonteCarloRunner {
    engine: SirEngine,
    num_snapshots: usize,
    seed: u64,
}

impl MonteCarloRunner {
    /// Validate `config`, build the engine and fix the master seed
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let engine = SirEngine::new(config.engine.clone())?;

        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::thread_rng().gen();
                info!("No seed configured, drew {}", seed);
                seed
            }
        };

        Ok(Self {
            engine,
            num_snapshots: config.num_snapshots,
            seed,
        })
    }

    pub fn engine(&self) -> &SirEngine {
        &self.engine
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn num_snapshots(&self) -> usize {
        self.num_snapshots
    }

    pub fn run(&self) -> SimulationRun {
        let reuse = self.engine.config().reuse_factor;
        info!(
            "Running {} snapshots (reuse {}, ε = {}, seed {})",
            self.num_snapshots,
            reuse,
            self.engine.config().power_control_exponent,
            self.seed
        );

        let completed = AtomicUsize::new(0);
        let samples: Vec<SirSample> = (0..self.num_snapshots)
            .into_par_iter()
            .map(|index| {
                let mut rng = snapshot_rng(self.seed, index as u64);
                let sample = self.engine.snapshot_sir(&mut rng);

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if done % PROGRESS_INTERVAL == 0 {
                    info!("Snapshot {}/{} done", done, self.num_snapshots);
                }
                sample
            })
            .collect();

        let free = samples.iter().filter(|s| s.is_interference_free()).count();
        if free > 0 {
            warn!("{} of {} snapshots saw no co-channel interference", free, samples.len());
        }

        SimulationRun {
            reuse_factor: reuse,
            seed: self.seed,
            samples,
        }
    }
}

/// One configuration run under every reuse factor with a shared seed
#[derive(Debug, Clone)]
pub struct ReuseSweep {
    pub runs: Vec<SimulationRun>,
}

impl ReuseSweep {
    pub fn run(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::thread_rng().gen();
                info!("No seed configured, drew {} for the reuse sweep", seed);
                seed
            }
        };

        let mut runs = Vec::with_capacity(ReuseFactor::ALL.len());
        for reuse in ReuseFactor::ALL {
            let swept = SimConfig {
                engine: config.engine.with_reuse(reuse),
                seed: Some(seed),
                ..config.clone()
            };
            runs.push(MonteCarloRunner::new(&swept)?.run());
        }

        Ok(Self { runs })
    }

    pub fn get(&self, reuse: ReuseFactor) -> Option<&SimulationRun> {
        self.runs.iter().find(|r| r.reuse_factor == reuse)
    }
}
