//! Tunable physics parameters
//!
//! Defaults reproduce the reference ride. Every value can be overridden
//! through [`crate::Settings`].

use serde::{Deserialize, Serialize};

use crate::SimError;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Downward acceleration added to vy every tick
    pub gravity: f32,
    /// Velocity decay per tick, slightly below 1
    pub friction: f32,
    /// Distance from the nearest sample that triggers a pull-back
    pub snap_threshold: f32,
    /// Distance left between ball and sample after a pull-back
    pub snap_residual: f32,
    /// |tangent.y| above which a section counts as steep
    pub boost_tangent_threshold: f32,
    /// Along-track speed below which steep sections are boosted
    pub boost_speed_floor: f32,
    /// Boost factor (1.0 disables the boost)
    pub boost_multiplier: f32,
    /// Display scaling for energy units
    pub mass_scale: f32,
    /// Horizontal velocity applied on start
    pub launch_speed: f32,
    /// Multiplier for the speed readout
    pub speed_display_scale: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            snap_threshold: SNAP_THRESHOLD,
            snap_residual: SNAP_RESIDUAL,
            boost_tangent_threshold: BOOST_TANGENT_THRESHOLD,
            boost_speed_floor: BOOST_SPEED_FLOOR,
            boost_multiplier: BOOST_MULTIPLIER,
            mass_scale: MASS_SCALE,
            launch_speed: LAUNCH_SPEED,
            speed_display_scale: SPEED_DISPLAY_SCALE,
        }
    }
}

impl PhysicsParams {
    /// Same parameters with the loop boost switched off
    pub fn without_boost(self) -> Self {
        Self {
            boost_multiplier: 1.0,
            ..self
        }
    }

    /// Reject values the integrator cannot work with
    pub fn validate(&self) -> Result<(), SimError> {
        let all = [
            self.gravity,
            self.friction,
            self.snap_threshold,
            self.snap_residual,
            self.boost_tangent_threshold,
            self.boost_speed_floor,
            self.boost_multiplier,
            self.mass_scale,
            self.launch_speed,
            self.speed_display_scale,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(SimError::InvalidConfig("physics parameters must be finite"));
        }
        if self.gravity < 0.0 {
            return Err(SimError::InvalidConfig("gravity must not be negative"));
        }
        if self.friction <= 0.0 || self.friction > 1.0 {
            return Err(SimError::InvalidConfig("friction must be in (0, 1]"));
        }
        if self.snap_threshold <= 0.0 {
            return Err(SimError::InvalidConfig("snap threshold must be positive"));
        }
        if self.snap_residual < 0.0 || self.snap_residual > self.snap_threshold {
            return Err(SimError::InvalidConfig(
                "snap residual must be between 0 and the snap threshold",
            ));
        }
        if self.boost_multiplier < 1.0 {
            return Err(SimError::InvalidConfig("boost multiplier must be at least 1"));
        }
        Ok(())
    }
}
