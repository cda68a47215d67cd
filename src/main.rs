//! Hex Bounce entry point
//!
//! Headless driver for the fixed-rate loop. A scripted command queue stands
//! in for the UI, and the last frame can be dumped as JSON for a renderer.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use hex_bounce::Settings;
use hex_bounce::renderer::frame_vertices;
use hex_bounce::sim::{Command, Frame, SimState, TickInput, tick};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Settings JSON file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Extra balls added before the first tick
    #[arg(short, long, default_value_t = 0)]
    balls: u32,

    /// Spin faster (positive) or slower (negative) by this many steps on the first tick
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    spin: i32,

    /// Sleep to each tick boundary instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Write the final frame as JSON
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Print the default settings as JSON and exit
    #[arg(long)]
    print_defaults: bool,
}

/// Commands queued before the first tick
fn opening_commands(args: &Args) -> TickInput {
    let mut input = TickInput::default();
    for _ in 0..args.balls {
        input.push(Command::AddBall);
    }
    let spin = if args.spin >= 0 {
        Command::SpinFaster
    } else {
        Command::SpinSlower
    };
    for _ in 0..args.spin.unsigned_abs() {
        input.push(spin);
    }
    input
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.print_defaults {
        println!("{}", Settings::default().to_json()?);
        return Ok(());
    }

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    log::info!("Hex Bounce (headless) starting...");
    log::info!("Seed {}, {} ticks at {} Hz", settings.seed, args.ticks, settings.tick_rate_hz);

    let tick_period = Duration::from_secs_f64(1.0 / settings.tick_rate_hz as f64);
    let mut state = SimState::new(settings);
    let mut input = opening_commands(&args);

    let mut wall_bounces = 0u64;
    let mut ball_contacts = 0u64;
    let started = Instant::now();
    let mut next_tick = started;

    for _ in 0..args.ticks {
        let report = tick(&mut state, &input);
        input.clear();
        wall_bounces += u64::from(report.wall_bounces);
        ball_contacts += u64::from(report.ball_contacts);

        if log::log_enabled!(log::Level::Trace) {
            let frame = Frame::capture(&state);
            log::trace!("frame {}: {} vertices", frame.tick, frame_vertices(&frame).len());
        }

        if args.realtime {
            next_tick += tick_period;
            let now = Instant::now();
            if next_tick > now {
                std::thread::sleep(next_tick - now);
            } else {
                // Fell behind; don't try to catch up
                next_tick = now;
            }
        }
    }

    log::info!(
        "Ran {} ticks in {:.2?}: {} balls, {} wall bounces, {} ball contacts, kinetic energy {:.2}",
        state.time_ticks,
        started.elapsed(),
        state.balls.len(),
        wall_bounces,
        ball_contacts,
        state.kinetic_energy()
    );

    if let Some(path) = &args.dump {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &Frame::capture(&state))?;
        log::info!("Final frame written to {}", path.display());
    }

    Ok(())
}
