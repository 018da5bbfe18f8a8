//! Browser handle
//!
//! The page owns the animation loop and the canvas. Each frame it calls
//! `tick()` and then reads the ball, readout and gauge values to redraw.
//! Geometry is handed over as flat `[x0, y0, x1, y1, ...]` arrays.

use wasm_bindgen::prelude::*;

use crate::Settings;
use crate::sim::{DrawingArea, EnergySample, GaugeParams, SimState, TickReport, tick};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Coaster physics starting...");
}

#[wasm_bindgen]
pub struct CoasterHandle {
    state: SimState,
    gauge: GaugeParams,
    last: TickReport,
}

#[wasm_bindgen]
impl CoasterHandle {
    /// Build a ride sized for a browser window of the given width
    #[wasm_bindgen(constructor)]
    pub fn new(window_width: f32) -> Result<CoasterHandle, JsError> {
        let settings = Settings::load();
        let state = SimState::new(settings.physics, DrawingArea::for_window(window_width))?;
        let mut handle = Self {
            state,
            gauge: settings.gauge,
            last: TickReport {
                energy: EnergySample::default(),
                speed: 0.0,
                speed_readout: 0,
                running: false,
            },
        };
        handle.last = tick(&mut handle.state);
        Ok(handle)
    }

    pub fn start(&mut self) {
        self.state.start_run();
    }

    pub fn reset(&mut self) {
        self.state.reset_run();
        self.last = tick(&mut self.state);
    }

    /// Rebuild the track for a new window width; the ball goes back to the start
    pub fn resize(&mut self, window_width: f32) -> Result<(), JsError> {
        self.state.resize(DrawingArea::for_window(window_width))?;
        self.last = tick(&mut self.state);
        Ok(())
    }

    /// Advance one frame. Returns whether the ride is still running.
    pub fn tick(&mut self) -> bool {
        self.last = tick(&mut self.state);
        self.last.running
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.state.is_running()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 {
        self.state.area.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 {
        self.state.area.height
    }

    #[wasm_bindgen(getter)]
    pub fn ball_x(&self) -> f32 {
        self.state.ball.pos.x
    }

    #[wasm_bindgen(getter)]
    pub fn ball_y(&self) -> f32 {
        self.state.ball.pos.y
    }

    #[wasm_bindgen(getter)]
    pub fn speed(&self) -> u32 {
        self.last.speed_readout
    }

    #[wasm_bindgen(getter)]
    pub fn kinetic(&self) -> f32 {
        self.last.energy.kinetic
    }

    #[wasm_bindgen(getter)]
    pub fn potential(&self) -> f32 {
        self.last.energy.potential
    }

    #[wasm_bindgen(getter)]
    pub fn total(&self) -> f32 {
        self.last.energy.total()
    }

    /// Kinetic, potential and total bar heights
    pub fn gauge_bars(&self) -> Vec<f32> {
        self.gauge.bar_heights(&self.last.energy).to_vec()
    }

    pub fn track_points(&self) -> Vec<f32> {
        self.state
            .track
            .points()
            .iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    /// Support posts as (top, foot) pairs
    pub fn support_posts(&self) -> Vec<f32> {
        self.state
            .track
            .support_posts(&self.state.area)
            .flat_map(|(top, foot)| [top.x, top.y, foot.x, foot.y])
            .collect()
    }

    pub fn finish_marker(&self) -> Vec<f32> {
        let (top, bottom) = self.state.track.finish_marker();
        vec![top.x, top.y, bottom.x, bottom.y]
    }
}
