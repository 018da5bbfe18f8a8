//! Coaster Physics - a ball riding a fixed roller coaster track
//!
//! Core modules:
//! - `sim`: Deterministic simulation (track geometry, track follower, energy)
//! - `settings`: Tunable parameters, persisted as JSON
//! - `error`: Configuration errors raised before the first tick
//! - `web`: Browser handle driven by the page's animation loop (wasm only)

pub mod error;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::SimError;
pub use settings::Settings;

/// Reference-scale constants the defaults are tuned against
pub mod consts {
    /// Drawing area the track layout was designed for
    pub const REFERENCE_WIDTH: f32 = 800.0;
    pub const REFERENCE_HEIGHT: f32 = 400.0;
    /// Horizontal margin kept around the drawing area on narrow windows
    pub const WINDOW_MARGIN: f32 = 40.0;

    /// Constant downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.2;
    /// Multiplicative velocity decay per tick
    pub const FRICTION: f32 = 0.997;

    /// Distance from the nearest sample beyond which the ball is pulled back
    pub const SNAP_THRESHOLD: f32 = 15.0;
    /// Gap left between ball and sample after a pull-back
    pub const SNAP_RESIDUAL: f32 = 10.0;

    /// |tangent.y| above which the track counts as steep
    pub const BOOST_TANGENT_THRESHOLD: f32 = 0.7;
    /// Along-track speed below which a steep section gets boosted
    pub const BOOST_SPEED_FLOOR: f32 = 3.0;
    /// Boost factor, keeps the ball from stalling inside loops
    pub const BOOST_MULTIPLIER: f32 = 1.05;

    /// Display scaling for energy units (not a physical mass)
    pub const MASS_SCALE: f32 = 10.0;
    /// Horizontal push applied on start
    pub const LAUNCH_SPEED: f32 = 5.0;
    /// Multiplier for the speed readout
    pub const SPEED_DISPLAY_SCALE: f32 = 10.0;

    /// Energy that fills a gauge bar
    pub const GAUGE_MAX_ENERGY: f32 = 150.0;
    /// Height of a full gauge bar
    pub const GAUGE_BAR_MAX_HEIGHT: f32 = 80.0;
}
