//! Simulation state
//!
//! `SimState` is the context object the caller owns and hands to `tick`.
//! Nothing here is global; two states never share anything.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::params::PhysicsParams;
use super::track::Track;
use crate::SimError;
use crate::consts::{REFERENCE_HEIGHT, REFERENCE_WIDTH, WINDOW_MARGIN};

/// Whether the ride is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Ball parked at the start, waiting for a push
    #[default]
    Idle,
    /// Ball moving along the track
    Running,
}

/// The moving point mass
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl BallState {
    /// Ball at rest at `pos`
    pub fn at_rest(pos: Vec2) -> Self {
        Self { pos, vel: Vec2::ZERO }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Rectangle the ride is drawn in; leaving it ends the run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawingArea {
    pub width: f32,
    pub height: f32,
}

impl Default for DrawingArea {
    fn default() -> Self {
        Self::new(REFERENCE_WIDTH, REFERENCE_HEIGHT)
    }
}

impl DrawingArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size for a browser window: full reference width when it fits,
    /// otherwise the window width minus a margin.
    pub fn for_window(window_width: f32) -> Self {
        let width = if window_width > REFERENCE_WIDTH {
            REFERENCE_WIDTH
        } else {
            window_width - WINDOW_MARGIN
        };
        Self::new(width, REFERENCE_HEIGHT)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(SimError::InvalidConfig("drawing area must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(SimError::InvalidConfig("drawing area must have positive size"));
        }
        Ok(())
    }

    /// Out of bounds means past the left, right or bottom edge.
    /// The top stays open so the ball can crest above the frame and fall back.
    #[inline]
    pub fn is_out_of_bounds(&self, pos: Vec2) -> bool {
        pos.x < 0.0 || pos.x > self.width || pos.y > self.height
    }
}

/// Everything one ride needs, owned by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub params: PhysicsParams,
    pub area: DrawingArea,
    pub track: Track,
    /// Read-only for the shell: change it through `start_run`/`reset_run`
    pub ball: BallState,
    /// Read-only for the shell, see `ball`
    pub phase: RunPhase,
    /// Ticks advanced since the last reset
    pub time_ticks: u64,
}

impl SimState {
    /// Generate the reference track for `area` and park the ball at its start
    pub fn new(params: PhysicsParams, area: DrawingArea) -> Result<Self, SimError> {
        area.validate()?;
        let track = Track::generate(&area);
        Self::with_track(params, area, track)
    }

    /// Use a caller-supplied track
    pub fn with_track(
        params: PhysicsParams,
        area: DrawingArea,
        track: Track,
    ) -> Result<Self, SimError> {
        params.validate()?;
        area.validate()?;
        let ball = BallState::at_rest(track.first());
        Ok(Self {
            params,
            area,
            track,
            ball,
            phase: RunPhase::Idle,
            time_ticks: 0,
        })
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Give the parked ball its launch push. Ignored while already running.
    pub fn start_run(&mut self) {
        if self.is_running() {
            return;
        }
        self.ball = super::tick::start_run(self.ball, &self.params);
        self.phase = RunPhase::Running;
        log::info!("Run started at ({:.1}, {:.1})", self.ball.pos.x, self.ball.pos.y);
    }

    /// Park the ball at the track start with zero velocity. Idempotent.
    pub fn reset_run(&mut self) {
        self.ball = super::tick::reset_run(&self.track);
        self.phase = RunPhase::Idle;
        self.time_ticks = 0;
    }

    /// Regenerate the track for a new area. Progress is discarded.
    pub fn resize(&mut self, area: DrawingArea) -> Result<(), SimError> {
        area.validate()?;
        self.area = area;
        self.track = Track::generate(&area);
        self.reset_run();
        log::debug!("Resized to {}x{}, ball reset", area.width, area.height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_window_sizing() {
        assert_eq!(DrawingArea::for_window(1200.0), DrawingArea::new(800.0, 400.0));
        assert_eq!(DrawingArea::for_window(800.0), DrawingArea::new(760.0, 400.0));
        assert_eq!(DrawingArea::for_window(400.0), DrawingArea::new(360.0, 400.0));
        assert!(DrawingArea::for_window(30.0).validate().is_err());
    }

    #[test]
    fn test_out_of_bounds_edges() {
        let area = DrawingArea::new(100.0, 50.0);
        assert!(!area.is_out_of_bounds(Vec2::new(0.0, 0.0)));
        assert!(!area.is_out_of_bounds(Vec2::new(100.0, 50.0)));
        assert!(!area.is_out_of_bounds(Vec2::new(50.0, -500.0)));
        assert!(area.is_out_of_bounds(Vec2::new(-0.1, 10.0)));
        assert!(area.is_out_of_bounds(Vec2::new(100.1, 10.0)));
        assert!(area.is_out_of_bounds(Vec2::new(10.0, 50.1)));
    }

    #[test]
    fn test_new_parks_ball_at_start() {
        let state = SimState::new(PhysicsParams::default(), DrawingArea::default()).unwrap();
        assert_eq!(state.phase, RunPhase::Idle);
        assert_eq!(state.ball, BallState::at_rest(state.track.first()));
    }

    #[test]
    fn test_start_is_ignored_while_running() {
        let mut state = SimState::new(PhysicsParams::default(), DrawingArea::default()).unwrap();
        state.start_run();
        assert!(state.is_running());
        state.ball.vel = Vec2::new(1.0, 2.0);
        state.start_run();
        assert_eq!(state.ball.vel, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = SimState::new(PhysicsParams::default(), DrawingArea::default()).unwrap();
        state.start_run();
        state.ball.pos += Vec2::new(30.0, 30.0);
        state.reset_run();
        let once = state.ball;
        state.reset_run();
        assert_eq!(state.ball, once);
        assert_eq!(state.ball, BallState::at_rest(state.track.first()));
        assert_eq!(state.phase, RunPhase::Idle);
    }

    #[test]
    fn test_resize_regenerates_and_resets() {
        let mut state = SimState::new(PhysicsParams::default(), DrawingArea::default()).unwrap();
        state.start_run();
        state.resize(DrawingArea::new(400.0, 400.0)).unwrap();
        assert_eq!(state.track.first(), Vec2::new(25.0, 40.0));
        assert_eq!(state.ball.pos, state.track.first());
        assert!(!state.is_running());
        assert!(state.resize(DrawingArea::new(0.0, 400.0)).is_err());
    }

    #[test]
    fn test_deserialize_rejects_empty_track() {
        let mut json = serde_json::to_value(
            SimState::new(PhysicsParams::default(), DrawingArea::default()).unwrap(),
        )
        .unwrap();
        json["track"] = serde_json::json!([]);
        assert!(serde_json::from_value::<SimState>(json).is_err());
    }

    #[test]
    fn test_with_track_rejects_bad_params() {
        let track = Track::from_points(vec![Vec2::ZERO, Vec2::X]).unwrap();
        let params = PhysicsParams {
            friction: 2.0,
            ..Default::default()
        };
        assert!(SimState::with_track(params, DrawingArea::default(), track).is_err());
    }
}
