//! Tilt Maze headless demo
//!
//! Generates a maze, rolls the ball with a scripted tilt sweep and logs what
//! happened. There is no display or IMU here; those live with the firmware.
//!
//! Usage: `tilt-maze [PRESET|FILE] [SEED] [--frames N] [--scene]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tilt Maze (native) starting...");

    let args = <demo::Args as clap::Parser>::parse();
    if let Err(e) = demo::run(args) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is driven by the embedding firmware
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::Path;
    use std::time::{Duration, Instant};

    use clap::Parser;
    use tilt_maze::clock::ClockTime;
    use tilt_maze::sim::{MazeRun, TickInput, tick};
    use tilt_maze::{MazeError, MazePreset, MazeSettings};

    const FRAME: Duration = Duration::from_millis(16);
    /// Peak tilt of the scripted sweep, degrees
    const SWEEP_TILT: f32 = 25.0;

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Roll a ball through a generated maze", long_about = None)]
    pub struct Args {
        /// Preset name (rectangular, circular, clock) or a settings JSON file.
        #[arg(value_name = "PRESET|FILE", default_value = "circular")]
        maze: String,
        /// RNG seed, overriding the preset or file.
        #[arg(value_name = "SEED")]
        seed: Option<u64>,
        /// Number of 16 ms frames to simulate.
        #[arg(
            long,
            value_name = "N",
            default_value_t = 3_000,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        frames: u32,
        /// Print the final scene as JSON.
        #[arg(long)]
        scene: bool,
    }

    impl Args {
        fn settings(&self) -> Result<MazeSettings, MazeError> {
            let mut settings = match MazePreset::from_str(&self.maze) {
                Some(preset) => MazeSettings::from_preset(preset),
                None => {
                    let path = Path::new(&self.maze);
                    let json = std::fs::read_to_string(path).map_err(|e| {
                        MazeError::Config(format!("cannot read {:?}: {}", path, e))
                    })?;
                    MazeSettings::from_json(&json)?
                }
            };
            if let Some(seed) = self.seed {
                settings.seed = seed;
            }
            Ok(settings)
        }
    }

    /// Slowly rotating tilt so the ball visits every wall direction
    fn sweep(frame: u32) -> TickInput {
        let phase = frame as f32 * 0.01;
        TickInput::new(SWEEP_TILT * phase.sin(), SWEEP_TILT * phase.cos())
    }

    pub fn run(args: Args) -> Result<(), MazeError> {
        let settings = args.settings()?;
        let start = Instant::now();
        let mut run = MazeRun::new(&settings, start)?;
        log::info!(
            "{:?} maze, seed {}, {} passages, spawn {:?}, exit {:?}",
            run.maze.topology(),
            settings.seed,
            run.maze.passages(),
            run.maze.spawn_pixel(),
            run.maze.exit_pixel()
        );

        let mut collisions = 0u64;
        let mut substeps = 0u64;
        let mut escapes = 0u32;
        for frame in 1..=args.frames {
            let report = tick(&mut run, &sweep(frame), start + FRAME * frame);
            collisions += report.step.collisions as u64;
            substeps += report.step.substeps as u64;
            if report.escaped {
                escapes += 1;
            }
        }

        log::info!(
            "{} frames: {} substeps, {} collisions, {} escapes, now on level {}",
            args.frames,
            substeps,
            collisions,
            escapes,
            run.level
        );

        if args.scene {
            let scene = run.scene(run.clock().map(|_| ClockTime::new(10, 10)));
            println!("{}", serde_json::to_string_pretty(&scene)?);
        }
        Ok(())
    }

}
