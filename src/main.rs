//! Pegboard entry point
//!
//! Runs the pegboard headless: balls drop into the bumper field at a fixed
//! cadence, the world steps at a fixed rate and sprites follow the bodies.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::Instant;

    use pegboard::consts::BOARD_HEIGHT;
    use pegboard::{
        BridgeConfig, PegboardLayout, RapierWorld, SimulationBridge, SpriteList,
        pegboard_layout,
    };

    /// Command line options
    struct Options {
        frames: u64,
        seed: Option<u64>,
        config: Option<PathBuf>,
        dump: Option<PathBuf>,
        log_every: u64,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                frames: 1200,
                seed: None,
                config: None,
                dump: None,
                log_every: 80,
            }
        }
    }

    const USAGE: &str =
        "usage: pegboard [--frames N] [--seed S] [--config PATH] [--dump PATH] [--log-every N]";

    fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
        let mut options = Options::default();
        while let Some(flag) = args.next() {
            let mut value = || args.next().ok_or_else(|| format!("{flag} needs a value"));
            match flag.as_str() {
                "--frames" => options.frames = value()?.parse().map_err(|e| format!("--frames: {e}"))?,
                "--seed" => options.seed = Some(value()?.parse().map_err(|e| format!("--seed: {e}"))?),
                "--config" => options.config = Some(value()?.into()),
                "--dump" => options.dump = Some(value()?.into()),
                "--log-every" => {
                    options.log_every = value()?
                        .parse()
                        .map_err(|e| format!("--log-every: {e}"))?
                }
                "-h" | "--help" => return Err(USAGE.to_string()),
                other => return Err(format!("unknown argument {other}\n{USAGE}")),
            }
        }
        Ok(options)
    }

    /// Frame timing, like the on-screen processing/drawing readout
    #[derive(Default)]
    struct FrameTimes {
        processing: f64,
        drawing: f64,
        worst_processing: f64,
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let options = parse_args(std::env::args().skip(1))?;

        let mut config = match &options.config {
            Some(path) => BridgeConfig::load(path)?,
            None => BridgeConfig::default(),
        };
        if let Some(seed) = options.seed {
            config.seed = seed;
        }

        let fixed_dt = config.fixed_dt;
        let world = RapierWorld::new(config.gravity);
        let mut bridge = SimulationBridge::new(config, world, SpriteList::new())?;
        bridge.initialize(&pegboard_layout(&PegboardLayout::default()))?;
        log::info!(
            "Pegboard running for {} frames (seed {}, dt {:.4}s, board height {})",
            options.frames,
            bridge.config().seed,
            fixed_dt,
            BOARD_HEIGHT
        );

        let mut times = FrameTimes::default();
        for frame in 1..=options.frames {
            let start = Instant::now();
            // Exhaustion only skips a spawn; keep running
            if let Err(e) = bridge.tick(fixed_dt) {
                log::warn!("Frame {frame}: {e}");
            }
            times.processing = start.elapsed().as_secs_f64();
            times.worst_processing = times.worst_processing.max(times.processing);

            let draw_start = Instant::now();
            bridge.draw();
            times.drawing = draw_start.elapsed().as_secs_f64();

            if options.log_every > 0 && frame % options.log_every == 0 {
                log::info!(
                    "Frame {frame}: {} balls, processing {:.3}ms, drawing {:.3}ms, {} batches",
                    bridge.entity_count(),
                    times.processing * 1000.0,
                    times.drawing * 1000.0,
                    bridge.surface().batches().len()
                );
            }
        }

        let stats = bridge.stats();
        log::info!(
            "Done: {} live, {} spawned, {} reaped, {} failed spawns, worst tick {:.3}ms",
            bridge.entity_count(),
            stats.spawned,
            stats.reaped,
            stats.spawn_failures,
            times.worst_processing * 1000.0
        );

        if let Some(path) = &options.dump {
            let json = serde_json::to_string_pretty(&bridge.snapshot())?;
            std::fs::write(path, json)?;
            log::info!("Snapshot written to {}", path.display());
        }

        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pegboard (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is usable from wasm hosts directly
}
