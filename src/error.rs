//! Errors raised while setting up a simulation
//!
//! A running simulation never fails: numerical degeneracies inside a tick
//! fall back to no-ops. Everything here is caught at construction time.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// The track needs at least two samples to define a direction
    #[error("track must contain at least 2 samples, got {len}")]
    TrackTooShort { len: usize },
    /// A parameter is out of its usable range
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Settings file could not be read
    #[error("cannot read settings: {0}")]
    Io(#[from] std::io::Error),
    /// Stored settings could not be parsed
    #[error("malformed settings: {0}")]
    Settings(#[from] serde_json::Error),
}
