//! Headless waterwheel driver
//!
//! Steps the simulation at a fixed frame rate, applying the same time
//! scaling and delta clamp a rendering host would, and logs the trajectory.
//! No rendering happens here; a renderer is a separate consumer of the
//! library's state surface.

use std::path::PathBuf;

use clap::Parser;
use rand::Rng;

use waterwheel::persistence::{load_snapshot, save_snapshot};
use waterwheel::sim::integrate;
use waterwheel::{SimSettings, WheelState};

#[derive(Parser, Debug)]
#[command(name = "waterwheel", about = "Headless chaotic waterwheel simulation")]
struct Args {
    /// Number of buckets around the rim (default 17, or the config value)
    #[arg(long)]
    buckets: Option<usize>,
    /// Run seed; a fresh one is drawn and logged when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated duration in seconds
    #[arg(long, default_value_t = 30.0)]
    duration: f64,
    /// Frame rate the driver emulates
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// Settings file (JSON); explicit flags override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Resume from a snapshot instead of constructing a fresh wheel
    #[arg(long)]
    resume: Option<PathBuf>,
    /// Write a snapshot of the final state here
    #[arg(long)]
    save: Option<PathBuf>,
}

fn run(args: &Args) -> waterwheel::Result<()> {
    let mut settings = match &args.config {
        Some(path) => SimSettings::load(path)?,
        None => SimSettings::default(),
    };
    if let Some(buckets) = args.buckets {
        settings.bucket_count = buckets;
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }

    let mut wheel = match &args.resume {
        Some(path) => load_snapshot(path)?,
        None => {
            let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
            WheelState::with_params(settings.bucket_count, settings.params.clone(), seed)?
        }
    };
    log::info!("Wheel: {} buckets, seed {}", wheel.bucket_count(), wheel.seed);

    let dt = settings.frame_dt(args.fps);
    let frames = (args.duration * args.fps).ceil().max(0.0) as u64;
    log::info!("Stepping {frames} frames at dt = {dt:.4}s");

    let mut sim_time = 0.0;
    let mut next_report = 1.0;
    let mut reversals = 0u32;
    let mut prev_sign = wheel.angular_velocity.signum();
    for _ in 0..frames {
        integrate(&mut wheel, dt);
        sim_time += dt;

        // Direction reversals are the chaotic signature of this system
        let sign = wheel.angular_velocity.signum();
        if sign != prev_sign && wheel.angular_velocity.abs() > 1e-6 {
            reversals += 1;
            prev_sign = sign;
        }

        if sim_time >= next_report {
            log::info!(
                "t={sim_time:6.2}s rotation={:9.3} velocity={:8.3} water={:7.3}",
                wheel.rotation,
                wheel.angular_velocity,
                wheel.total_mass()
            );
            next_report += 1.0;
        }
    }
    log::info!("Done: {reversals} direction reversals over {sim_time:.1} simulated seconds");

    if let Some(path) = &args.save {
        save_snapshot(&wheel, path)?;
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        log::error!("{err}");
        std::process::exit(1);
    }
}
