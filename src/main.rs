//! Coaster Physics entry point
//!
//! Natively this plays one ride without a window and logs telemetry.
//! The browser build is driven through `web::CoasterHandle` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;

    use coaster_physics::sim::{DrawingArea, SimState, speed_readout, tick};
    use coaster_physics::{Settings, SimError};

    /// Ride the coaster headless and log energy telemetry
    #[derive(Parser, Debug)]
    #[command(name = "coaster", version, about, long_about = None)]
    struct Cli {
        /// Settings JSON file (reference tuning when omitted)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Browser window width the drawing area is sized for
        #[arg(long, default_value_t = 840.0)]
        window_width: f32,

        /// Give up after this many ticks if the ball is still riding
        #[arg(long, default_value_t = 3600)]
        max_ticks: u64,

        /// Log telemetry every n ticks (0 disables)
        #[arg(long, default_value_t = 60)]
        report_every: u64,
    }

    pub fn main() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let cli = Cli::parse();

        match run(&cli) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        }
    }

    fn run(cli: &Cli) -> Result<(), SimError> {
        let settings = match &cli.settings {
            Some(path) => Settings::from_file(path)?,
            None => Settings::load(),
        };
        let scale = settings.physics.speed_display_scale;

        let mut state = SimState::new(settings.physics, DrawingArea::for_window(cli.window_width))?;
        log::info!(
            "Coaster (native) starting: {} samples, area {}x{}",
            state.track.len(),
            state.area.width,
            state.area.height
        );

        state.start_run();
        let mut peak_speed = 0.0f32;

        for n in 1..=cli.max_ticks {
            let report = tick(&mut state);
            peak_speed = peak_speed.max(report.speed);

            if !report.running {
                log::info!(
                    "Ride over after {n} ticks, peak speed {} m/s",
                    speed_readout(peak_speed, scale)
                );
                return Ok(());
            }

            if cli.report_every > 0 && n % cli.report_every == 0 {
                let [ke_bar, pe_bar, total_bar] = settings.gauge.bar_heights(&report.energy);
                log::info!(
                    "tick {n:>5}: pos=({:.1}, {:.1}) speed={} KE={:.1} PE={:.1} total={:.1} bars=[{ke_bar:.0} {pe_bar:.0} {total_bar:.0}]",
                    state.ball.pos.x,
                    state.ball.pos.y,
                    report.speed_readout,
                    report.energy.kinetic,
                    report.energy.potential,
                    report.energy.total(),
                );
            }
        }

        log::info!(
            "Still riding after {} ticks at ({:.1}, {:.1}), peak speed {} m/s",
            cli.max_ticks,
            state.ball.pos.x,
            state.ball.pos.y,
            speed_readout(peak_speed, scale)
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
