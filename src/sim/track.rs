//! Track geometry
//!
//! The ride is a dense polyline: a start point, a steep drop, three loops of
//! decreasing radius joined by straight and hilly connectors, and a final
//! hill that flattens into a runout. Index order is ride order.
//!
//! Layout coordinates are given for the 800-wide reference area and scaled
//! uniformly with the drawing width.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::DrawingArea;
use crate::SimError;
use crate::consts::REFERENCE_WIDTH;

/// Largest gap allowed between consecutive samples before a bridge is inserted
pub const MAX_SAMPLE_GAP: f32 = 8.0;
/// Target spacing of bridge samples
pub const BRIDGE_SPACING: f32 = 5.0;
/// Angular step used when sampling loops (degrees)
pub const LOOP_ANGLE_STEP_DEG: usize = 5;
/// Every n-th sample gets a support post
pub const SUPPORT_STRIDE: usize = 20;
/// Height of the ground strip at the bottom of the drawing area
pub const GROUND_HEIGHT: f32 = 30.0;
/// Half length of the finish marker
pub const FINISH_MARKER_HALF: f32 = 20.0;

/// Ordered track samples, at least two of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec2>", into = "Vec<Vec2>")]
pub struct Track {
    points: Vec<Vec2>,
}

impl TryFrom<Vec<Vec2>> for Track {
    type Error = SimError;

    fn try_from(points: Vec<Vec2>) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

impl From<Track> for Vec<Vec2> {
    fn from(track: Track) -> Self {
        track.points
    }
}

impl Track {
    /// Wrap an explicit sample list
    pub fn from_points(points: Vec<Vec2>) -> Result<Self, SimError> {
        if points.len() < 2 {
            return Err(SimError::TrackTooShort { len: points.len() });
        }
        Ok(Self { points })
    }

    /// Generate the reference ride scaled to the area's width.
    ///
    /// The area must already be validated (positive width).
    pub fn generate(area: &DrawingArea) -> Self {
        let mut b = TrackBuilder::new(area.width / REFERENCE_WIDTH);

        // Start high for plenty of potential energy
        b.push(Vec2::new(50.0, 80.0));

        // Steep first drop
        b.sample(50, |t| Vec2::new(50.0 + t * 100.0, 80.0 + t * 220.0));

        b.loop_around(Vec2::new(200.0, 250.0), 70.0);

        // Straight connector, slightly rising
        b.sample(20, |t| Vec2::new(200.0 + t * 100.0, 250.0 - t * 20.0));

        b.loop_around(Vec2::new(370.0, 230.0), 50.0);

        // Connector with a small hill
        b.sample(40, |t| {
            Vec2::new(370.0 + t * 120.0, 230.0 - (t * std::f32::consts::PI).sin() * 50.0)
        });

        b.loop_around(Vec2::new(550.0, 230.0), 40.0);

        // Hill in the first half, then a gentle runout
        b.sample(60, |t| {
            let hill = if t < 0.5 {
                -(t * std::f32::consts::TAU).sin() * 30.0
            } else {
                0.0
            };
            let runout = if t > 0.5 { (t - 0.5) * 40.0 } else { 0.0 };
            Vec2::new(550.0 + t * 200.0, 230.0 + hill + runout)
        });

        let track = b.finish();
        log::info!(
            "Generated track: {} samples for {}x{} area (max gap {:.2})",
            track.len(),
            area.width,
            area.height,
            track.max_spacing()
        );
        track
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sample `i`, clamped to the last sample
    #[inline]
    pub fn point(&self, i: usize) -> Vec2 {
        self.points[i.min(self.points.len() - 1)]
    }

    #[inline]
    pub fn first(&self) -> Vec2 {
        self.points[0]
    }

    #[inline]
    pub fn last(&self) -> Vec2 {
        self.points[self.points.len() - 1]
    }

    /// Largest distance between consecutive samples
    pub fn max_spacing(&self) -> f32 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .fold(0.0, f32::max)
    }

    /// Vertical support posts (top, foot) for every n-th sample above the ground
    pub fn support_posts(&self, area: &DrawingArea) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let ground_y = area.height - GROUND_HEIGHT;
        self.points
            .iter()
            .step_by(SUPPORT_STRIDE)
            .filter(move |p| p.y < ground_y)
            .map(move |&p| (p, Vec2::new(p.x, ground_y)))
    }

    /// Vertical line through the last sample
    pub fn finish_marker(&self) -> (Vec2, Vec2) {
        let end = self.last();
        (
            end - Vec2::new(0.0, FINISH_MARKER_HALF),
            end + Vec2::new(0.0, FINISH_MARKER_HALF),
        )
    }
}

/// Accumulates scaled samples, bridging gaps and dropping repeats
struct TrackBuilder {
    scale: f32,
    points: Vec<Vec2>,
}

impl TrackBuilder {
    fn new(scale: f32) -> Self {
        Self {
            scale,
            points: Vec::with_capacity(512),
        }
    }

    fn push(&mut self, p: Vec2) {
        let p = p * self.scale;
        if let Some(&last) = self.points.last() {
            if last == p {
                return;
            }
            let gap = last.distance(p);
            if gap > MAX_SAMPLE_GAP {
                let steps = (gap / BRIDGE_SPACING).ceil() as usize;
                for i in 1..steps {
                    self.points.push(last.lerp(p, i as f32 / steps as f32));
                }
            }
        }
        self.points.push(p);
    }

    /// Sample `f` at `steps + 1` evenly spaced parameters in [0, 1]
    fn sample(&mut self, steps: usize, f: impl Fn(f32) -> Vec2) {
        for i in 0..=steps {
            self.push(f(i as f32 / steps as f32));
        }
    }

    /// Full circle starting and ending at the top
    fn loop_around(&mut self, center: Vec2, radius: f32) {
        for deg in (-90i32..=270).step_by(LOOP_ANGLE_STEP_DEG) {
            let rad = (deg as f32).to_radians();
            self.push(center + radius * Vec2::new(rad.cos(), rad.sin()));
        }
    }

    fn finish(self) -> Track {
        Track {
            points: self.points,
        }
    }
}
