//! Domain generators for property-based testing
//!
//! Ranges cover the physically meaningful region of each parameter, not the
//! full `f64` line; invalid inputs get their own strategies.

use proptest::prelude::*;
use uplink_sir::{EngineConfig, ReuseFactor, NUM_CELLS, NUM_SECTORS};

// ============================================================================
// Radio Parameters
// ============================================================================

/// Cell radius in meters (small cells to macro cells)
pub fn cell_radius_m() -> impl Strategy<Value = f64> {
    50.0f64..5000.0
}

/// Path-loss exponent ν
pub fn path_loss_exponent() -> impl Strategy<Value = f64> {
    2.0f64..5.0
}

/// Shadow fading standard deviation in dB
pub fn shadow_std_db() -> impl Strategy<Value = f64> {
    0.0f64..12.0
}

/// Fractional power-control exponent ε in [0, 1]
pub fn power_control_exponent() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

/// Values that must fail validation as ε
pub fn invalid_power_control_exponent() -> impl Strategy<Value = f64> {
    prop_oneof![-10.0f64..-1e-6, 1.000_001f64..10.0]
}

/// Distance in meters, including sub-meter values below the path-loss floor
pub fn distance_m() -> impl Strategy<Value = f64> {
    prop_oneof![0.0f64..1.0, 1.0f64..20_000.0]
}

// ============================================================================
// Network Indices
// ============================================================================

pub fn reuse_factor() -> impl Strategy<Value = ReuseFactor> {
    prop::sample::select(ReuseFactor::ALL.to_vec())
}

/// Raw integers, most of which are not a supported reuse factor
pub fn raw_reuse_factor() -> impl Strategy<Value = u32> {
    0u32..16
}

pub fn cell_index() -> impl Strategy<Value = usize> {
    0..NUM_CELLS
}

pub fn sector_index() -> impl Strategy<Value = usize> {
    0..NUM_SECTORS
}

pub fn cell_sector() -> impl Strategy<Value = (usize, usize)> {
    (cell_index(), sector_index())
}

// ============================================================================
// Composite
// ============================================================================

pub fn seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Any valid engine configuration
pub fn engine_config() -> impl Strategy<Value = EngineConfig> {
    (
        cell_radius_m(),
        path_loss_exponent(),
        shadow_std_db(),
        reuse_factor(),
        power_control_exponent(),
    )
        .prop_map(|(radius, nu, sigma, reuse, eps)| EngineConfig {
            cell_radius_m: radius,
            path_loss_exponent: nu,
            shadow_fading_std_db: sigma,
            reuse_factor: reuse,
            power_control_exponent: eps,
        })
}
