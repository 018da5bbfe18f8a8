//! Deterministic simulation module
//!
//! The physics core of the ride. This module must stay pure:
//! - One tick per call, cadence chosen by the caller
//! - No globals; all state lives in a caller-owned `SimState`
//! - No rendering or platform dependencies

pub mod energy;
pub mod follow;
pub mod params;
pub mod state;
pub mod tick;
pub mod track;

pub use energy::{EnergySample, GaugeParams, sample_energy, speed_readout};
pub use follow::{free_fall, nearest_sample, project_onto_tangent, snap_toward, tangent_at};
pub use params::PhysicsParams;
pub use state::{BallState, DrawingArea, RunPhase, SimState};
pub use tick::{StepOutcome, TickReport, reset_run, start_run, step_ball, tick};
pub use track::Track;
