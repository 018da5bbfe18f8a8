//! Energy readout
//!
//! Derived values only; nothing here is stored between ticks.

use serde::{Deserialize, Serialize};

use super::params::PhysicsParams;
use super::state::BallState;
use crate::consts::{GAUGE_BAR_MAX_HEIGHT, GAUGE_MAX_ENERGY};

/// Kinetic and potential energy in display units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnergySample {
    pub kinetic: f32,
    pub potential: f32,
}

impl EnergySample {
    #[inline]
    pub fn total(&self) -> f32 {
        self.kinetic + self.potential
    }
}

/// Energy of `ball`, with height measured up from `reference_y`
/// (the bottom of the drawing area; y grows downward).
pub fn sample_energy(ball: &BallState, reference_y: f32, params: &PhysicsParams) -> EnergySample {
    let speed = ball.speed();
    EnergySample {
        kinetic: 0.5 * speed * speed * params.mass_scale,
        potential: (reference_y - ball.pos.y) * params.gravity * params.mass_scale,
    }
}

/// Speed as shown to the rider
#[inline]
pub fn speed_readout(speed: f32, scale: f32) -> u32 {
    (speed * scale).round().max(0.0) as u32
}

/// Scale of the energy bar chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeParams {
    /// Energy that fills a bar
    pub max_energy: f32,
    /// Height of a full bar
    pub bar_max_height: f32,
}

impl Default for GaugeParams {
    fn default() -> Self {
        Self {
            max_energy: GAUGE_MAX_ENERGY,
            bar_max_height: GAUGE_BAR_MAX_HEIGHT,
        }
    }
}

impl GaugeParams {
    /// Bar heights for kinetic, potential and total energy
    pub fn bar_heights(&self, sample: &EnergySample) -> [f32; 3] {
        let bar = |e: f32| (e / self.max_energy * self.bar_max_height).clamp(0.0, self.bar_max_height);
        [bar(sample.kinetic), bar(sample.potential), bar(sample.total())]
    }
}
