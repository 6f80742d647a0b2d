//! Per-link budget
//!
//! One transmitter (a user) heard by one receiver (a site). The received
//! channel gain uses the distance to the receiving site; the power-control
//! scale uses the distance to the user's own serving site. Both distances
//! get the 1 m floor.

use crate::channel::{clamp_distance, ChannelModel};
use crate::power::tx_power_scale;
use nalgebra::Point2;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkBudget {
    /// User to receiving site (m, floored)
    pub distance_to_receiver: f64,
    /// User to its own serving site (m, floored)
    pub distance_to_serving: f64,
    /// Power-control transmit scale
    pub tx_scale: f64,
    /// Path loss × shadowing toward the receiver
    pub gain: f64,
}

impl LinkBudget {
    pub fn evaluate<R: Rng + ?Sized>(
        user: Point2<f64>,
        serving_site: Point2<f64>,
        receiving_site: Point2<f64>,
        channel: &ChannelModel,
        power_control_exponent: f64,
        rng: &mut R,
    ) -> Self {
        let distance_to_receiver = clamp_distance(nalgebra::distance(&user, &receiving_site));
        let distance_to_serving = clamp_distance(nalgebra::distance(&user, &serving_site));

        Self {
            distance_to_receiver,
            distance_to_serving,
            tx_scale: tx_power_scale(
                distance_to_serving,
                power_control_exponent,
                channel.path_loss_exponent(),
            ),
            gain: channel.channel_gain(distance_to_receiver, rng),
        }
    }

    pub fn received_power(&self) -> f64 {
        self.tx_scale * self.gain
    }
}
