//! Per-frame simulation tick
//!
//! The caller decides the cadence (one tick per animation frame in the
//! browser, a plain loop natively). A tick never blocks and never leaves a
//! half-updated state behind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::energy::{EnergySample, sample_energy, speed_readout};
use super::follow::{free_fall, nearest_sample, project_onto_tangent, snap_toward, tangent_at};
use super::params::PhysicsParams;
use super::state::{BallState, DrawingArea, RunPhase, SimState};
use super::track::Track;

/// What the shell needs to redraw after a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub energy: EnergySample,
    pub speed: f32,
    /// Speed as displayed (scaled and rounded)
    pub speed_readout: u32,
    pub running: bool,
}

/// Result of advancing a single ball by one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Energy after the step, before any boundary reset
    pub energy: EnergySample,
    pub speed: f32,
    /// False when the ball left the area and was sent back to the start
    pub running: bool,
}

/// Ball with the launch push applied
pub fn start_run(ball: BallState, params: &PhysicsParams) -> BallState {
    BallState {
        pos: ball.pos,
        vel: Vec2::new(params.launch_speed, 0.0),
    }
}

/// Ball parked at the track start
pub fn reset_run(track: &Track) -> BallState {
    BallState::at_rest(track.first())
}

/// Advance `ball` one step along `track`.
///
/// Telemetry is taken before the boundary check, so the readout for the
/// final frame of a run still reflects where the ball actually was.
pub fn step_ball(
    ball: &mut BallState,
    track: &Track,
    params: &PhysicsParams,
    area: &DrawingArea,
) -> StepOutcome {
    free_fall(ball, params.gravity);

    let (index, _) = nearest_sample(track, ball.pos);
    ball.pos = snap_toward(ball.pos, track.point(index), params);

    // Tangent comes from the sample found before the pull-back
    let tangent = tangent_at(track, index, ball.vel.x);
    ball.vel = project_onto_tangent(ball.vel, tangent, params);

    let energy = sample_energy(ball, area.height, params);
    let speed = ball.speed();

    // Running past the last sample is fine; only leaving the area ends a run
    let running = !area.is_out_of_bounds(ball.pos);
    if !running {
        *ball = reset_run(track);
    }

    StepOutcome {
        energy,
        speed,
        running,
    }
}

/// Advance the simulation by one frame
pub fn tick(state: &mut SimState) -> TickReport {
    if state.phase != RunPhase::Running {
        return report(state, sample_energy(&state.ball, state.area.height, &state.params));
    }

    state.time_ticks += 1;
    let exit_pos = state.ball.pos;
    let outcome = step_ball(&mut state.ball, &state.track, &state.params, &state.area);

    if !outcome.running {
        log::debug!(
            "Ball left the area near ({:.1}, {:.1}) after {} ticks, resetting",
            exit_pos.x,
            exit_pos.y,
            state.time_ticks
        );
        state.reset_run();
    }

    TickReport {
        energy: outcome.energy,
        speed: outcome.speed,
        speed_readout: speed_readout(outcome.speed, state.params.speed_display_scale),
        running: outcome.running,
    }
}

fn report(state: &SimState, energy: EnergySample) -> TickReport {
    let speed = state.ball.speed();
    TickReport {
        energy,
        speed,
        speed_readout: speed_readout(speed, state.params.speed_display_scale),
        running: state.is_running(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flat_track() -> Track {
        Track::from_points(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 0.0),
        ])
        .unwrap()
    }

    fn running_state(params: PhysicsParams, track: Track, ball: BallState) -> SimState {
        let mut state = SimState::with_track(params, DrawingArea::default(), track).unwrap();
        state.start_run();
        state.ball = ball;
        state
    }

    #[test]
    fn test_flat_track_without_gravity() {
        let params = PhysicsParams {
            gravity: 0.0,
            friction: 1.0,
            ..Default::default()
        };
        let mut ball = BallState {
            pos: Vec2::ZERO,
            vel: Vec2::new(5.0, 0.0),
        };

        let outcome = step_ball(&mut ball, &flat_track(), &params, &DrawingArea::default());

        assert!(outcome.running);
        assert_eq!(ball.pos, Vec2::new(5.0, 0.0));
        assert_eq!(ball.vel, Vec2::new(5.0, 0.0));
        assert!((outcome.energy.kinetic - 12.5 * params.mass_scale).abs() < 1e-4);
        assert_eq!(outcome.energy.potential, 0.0);
        assert_eq!(outcome.speed, 5.0);
    }

    #[test]
    fn test_leaving_area_resets_run() {
        let track = flat_track();
        let mut state = running_state(
            PhysicsParams::default(),
            track.clone(),
            BallState::at_rest(Vec2::new(-1.0, 0.0)),
        );

        let report = tick(&mut state);

        assert!(!report.running);
        assert_eq!(state.phase, RunPhase::Idle);
        assert_eq!(state.ball, BallState::at_rest(track.first()));
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut state = SimState::new(PhysicsParams::default(), DrawingArea::default()).unwrap();
        let before = state.ball;

        let report = tick(&mut state);

        assert!(!report.running);
        assert_eq!(state.ball, before);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(report.speed_readout, 0);
        // Parked at (50, 80): 320 units above the bottom edge
        assert!((report.energy.potential - 320.0 * 0.2 * 10.0).abs() < 1e-2);
    }

    #[test]
    fn test_start_then_tick_moves_ball() {
        let mut state = SimState::new(PhysicsParams::default(), DrawingArea::default()).unwrap();
        state.start_run();
        assert_eq!(state.ball.vel, Vec2::new(5.0, 0.0));

        let report = tick(&mut state);

        assert!(report.running);
        assert_eq!(state.time_ticks, 1);
        assert_ne!(state.ball.pos, state.track.first());
    }

    #[test]
    fn test_energy_does_not_grow_on_decline_without_boost() {
        let params = PhysicsParams::default().without_boost();
        let area = DrawingArea::default();
        let track =
            Track::from_points((0..=300).map(|i| Vec2::splat(i as f32)).collect()).unwrap();
        let mut ball = BallState {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(1.0, 1.0),
        };

        let mut total = sample_energy(&ball, area.height, &params).total();
        for _ in 0..40 {
            let outcome = step_ball(&mut ball, &track, &params, &area);
            assert!(outcome.running);
            let next = outcome.energy.total();
            assert!(
                next <= total + total.abs() * 1e-4,
                "energy grew from {total} to {next}"
            );
            total = next;
        }
        // The ball really did roll down the slope
        assert!(ball.pos.y > 100.0);
    }

    #[test]
    fn test_boost_helps_on_steep_slow_section() {
        let track = Track::from_points(vec![Vec2::new(0.0, 100.0), Vec2::new(0.0, 0.0)]).unwrap();
        let area = DrawingArea::default();
        let start = BallState {
            pos: Vec2::new(0.0, 50.0),
            vel: Vec2::new(0.0, -1.0),
        };

        let with = PhysicsParams {
            gravity: 0.0,
            ..Default::default()
        };
        let without = with.without_boost();

        let mut a = start;
        let mut b = start;
        step_ball(&mut a, &track, &with, &area);
        step_ball(&mut b, &track, &without, &area);
        assert!(a.speed() > b.speed());
    }

    #[test]
    fn test_runout_past_last_sample_stays_bounded() {
        let params = PhysicsParams::default();
        let area = DrawingArea::default();
        let track = Track::generate(&area);
        let n = track.len();
        let start = track.point(n - 3);
        let mut ball = BallState {
            pos: start,
            vel: (track.last() - start).normalize() * 2.0,
        };

        for i in 0..1000 {
            let outcome = step_ball(&mut ball, &track, &params, &area);
            assert!(
                outcome.speed < params.launch_speed,
                "tick {i}: speed {} kept growing past the end",
                outcome.speed
            );
            if !outcome.running {
                break;
            }
        }
    }

    #[test]
    fn test_full_ride_stays_finite() {
        let mut state = SimState::new(PhysicsParams::default(), DrawingArea::default()).unwrap();
        state.start_run();
        for _ in 0..5000 {
            let report = tick(&mut state);
            assert!(report.speed.is_finite() && report.speed >= 0.0);
            assert!(report.speed < 25.0, "speed {} ran away", report.speed);
            assert!(report.energy.total().is_finite());
            if !report.running {
                assert_eq!(state.ball, BallState::at_rest(state.track.first()));
                break;
            }
        }
    }

    #[test]
    fn test_determinism() {
        let mut state1 = SimState::new(PhysicsParams::default(), DrawingArea::default()).unwrap();
        let mut state2 = state1.clone();
        state1.start_run();
        state2.start_run();

        for _ in 0..300 {
            let r1 = tick(&mut state1);
            let r2 = tick(&mut state2);
            assert_eq!(r1, r2);
        }
        assert_eq!(state1.ball, state2.ball);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_speed_stays_finite(vx in -20.0f32..20.0, vy in -20.0f32..20.0) {
            let mut state = SimState::new(PhysicsParams::default(), DrawingArea::default()).unwrap();
            state.start_run();
            state.ball.vel = Vec2::new(vx, vy);
            for _ in 0..400 {
                let report = tick(&mut state);
                prop_assert!(report.speed.is_finite());
                prop_assert!(report.speed >= 0.0);
                if !report.running {
                    break;
                }
            }
        }
    }
}
