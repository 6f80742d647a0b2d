//! Channel Model
//!
//! Distance-based path loss times log-normal shadow fading:
//!
//! ```text
//! G(d) = max(d, 1)^(-ν) · 10^(X/10),   X ~ N(0, σ²) [dB]
//! ```
//!
//! The 1 m floor is a modelling choice: users drawn on top of a site would
//! otherwise blow up `d^(-ν)`. Zero and negative distances are clamped, never
//! rejected.

use crate::{Result, SimError};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

/// Minimum distance fed into the path-loss law (m)
pub const MIN_DISTANCE_M: f64 = 1.0;

/// Apply the 1 m floor. NaN also maps to the floor.
pub fn clamp_distance(distance: f64) -> f64 {
    distance.max(MIN_DISTANCE_M)
}

/// Deterministic path-loss gain `max(d, 1)^(-ν)`
pub fn path_loss(distance: f64, path_loss_exponent: f64) -> f64 {
    clamp_distance(distance).powf(-path_loss_exponent)
}

/// Log-normal shadow fading source
#[derive(Debug, Clone, Copy)]
pub struct ShadowFading {
    std_db: f64,
    normal: Normal<f64>,
}

impl ShadowFading {
    /// Fails if `std_db` is negative or not finite
    pub fn new(std_db: f64) -> Result<Self> {
        if std_db < 0.0 {
            return Err(SimError::InvalidParameter {
                name: "shadow_fading_std_db",
                value: std_db,
                reason: "must be non-negative and finite",
            });
        }
        let normal = Normal::new(0.0, std_db)?;
        Ok(Self { std_db, normal })
    }

    pub fn std_db(&self) -> f64 {
        self.std_db
    }

    /// One independent linear-domain fading factor `10^(X/10)`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let x_db = self.normal.sample(rng);
        10f64.powf(x_db / 10.0)
    }
}

/// Path loss plus shadowing with fixed ν and σ
#[derive(Debug, Clone, Copy)]
pub struct ChannelModel {
    path_loss_exponent: f64,
    shadowing: ShadowFading,
}

impl ChannelModel {
    pub fn new(path_loss_exponent: f64, shadow_std_db: f64) -> Result<Self> {
        Ok(Self {
            path_loss_exponent,
            shadowing: ShadowFading::new(shadow_std_db)?,
        })
    }

    pub fn path_loss_exponent(&self) -> f64 {
        self.path_loss_exponent
    }

    pub fn path_loss(&self, distance: f64) -> f64 {
        path_loss(distance, self.path_loss_exponent)
    }

    pub fn shadow_fading_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.shadowing.sample(rng)
    }

    /// Path loss times a fresh shadowing draw; never cached between links
    pub fn channel_gain<R: Rng + ?Sized>(&self, distance: f64, rng: &mut R) -> f64 {
        let pl = self.path_loss(distance);
        let sf = self.shadow_fading_sample(rng);
        debug!("gain d={:.1} m pl={:.3e} sf={:.3}", distance, pl, sf);
        pl * sf
    }
}
