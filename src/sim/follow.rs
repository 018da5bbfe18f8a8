//! Track follower
//!
//! The pieces of one integrator step. A free-fall Euler step moves the ball,
//! then it is found on the track, pulled back if it strayed too far, and its
//! velocity is forced onto the local tangent. That last projection is what
//! keeps the mass glued to the curve.

use glam::Vec2;

use super::params::PhysicsParams;
use super::state::BallState;
use super::track::Track;

/// Semi-implicit Euler: gravity into velocity, then velocity into position
#[inline]
pub fn free_fall(ball: &mut BallState, gravity: f32) {
    ball.vel.y += gravity;
    ball.pos += ball.vel;
}

/// Index and distance of the sample closest to `pos`.
///
/// Linear scan over the whole track. On ties the lowest index wins, which
/// keeps the result deterministic.
pub fn nearest_sample(track: &Track, pos: Vec2) -> (usize, f32) {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, p) in track.points().iter().enumerate() {
        let dist = pos.distance(*p);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    (best, best_dist)
}

/// Pull `pos` toward `target` when it is more than the snap threshold away.
///
/// The ball ends `snap_residual` short of the sample rather than on it, so a
/// small overshoot does not read as a teleport. A ball sitting exactly on the
/// sample is left alone.
pub fn snap_toward(pos: Vec2, target: Vec2, params: &PhysicsParams) -> Vec2 {
    let offset = target - pos;
    let dist = offset.length();
    if dist <= params.snap_threshold || dist == 0.0 {
        return pos;
    }
    pos + offset / dist * (dist - params.snap_residual)
}

/// Unit tangent at sample `index`, looking ahead when moving right and
/// behind otherwise. Neighbours clamp to the track ends; a zero-length
/// neighbour vector yields `Vec2::ZERO`.
pub fn tangent_at(track: &Track, index: usize, vx: f32) -> Vec2 {
    let here = track.point(index);
    let dir = if vx > 0.0 {
        track.point(index + 1) - here
    } else {
        here - track.point(index.saturating_sub(1))
    };
    dir.normalize_or_zero()
}

/// Boost factor for this step: steep section and slow along-track speed
#[inline]
pub fn loop_boost(tangent: Vec2, along: f32, params: &PhysicsParams) -> f32 {
    if tangent.y.abs() > params.boost_tangent_threshold && along.abs() < params.boost_speed_floor {
        params.boost_multiplier
    } else {
        1.0
    }
}

/// Replace `vel` by its component along `tangent`, with friction and boost.
/// A zero tangent (the clamped end of the track) has no direction to carry
/// speed along, so the velocity drops to zero.
pub fn project_onto_tangent(vel: Vec2, tangent: Vec2, params: &PhysicsParams) -> Vec2 {
    if tangent == Vec2::ZERO {
        return Vec2::ZERO;
    }
    let along = vel.dot(tangent);
    along * tangent * params.friction * loop_boost(tangent, along, params)
}
