//! Fractional uplink power control
//!
//! `P = d_own^(ε·ν)`: ε = 0 is fixed transmit power, ε = 1 fully inverts the
//! path loss to the serving site. Range checks on ε live in
//! [`crate::config::EngineConfig::validate`], not here.

/// Transmit power scaling for a user `distance_to_own_bs` from its own site
pub fn tx_power_scale(
    distance_to_own_bs: f64,
    power_control_exponent: f64,
    path_loss_exponent: f64,
) -> f64 {
    distance_to_own_bs.powf(power_control_exponent * path_loss_exponent)
}
