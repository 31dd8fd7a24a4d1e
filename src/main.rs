//! Skyhop headless runner
//!
//! Plays one autopiloted run and prints its summary as JSON.
//!
//! Usage: `skyhop [tuning.json] [seed]`

use std::process::ExitCode;

use skyhop::sim::autopilot;
use skyhop::{Phase, Session, SessionParams, Tuning};

/// Host frame length
const FRAME_MS: f64 = 16.0;
/// Stop the demo after this much simulated time
const MAX_RUN_MS: f64 = 5.0 * 60.0 * 1000.0;

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => time_seed(),
    };
    log::info!("Skyhop (native) starting with seed {}", seed);

    let mut session = Session::new(tuning, SessionParams::default(), seed)?;

    if !session.start() {
        log::warn!("No energy left");
        return Ok(());
    }

    let mut elapsed = 0.0;
    while session.phase() == Phase::Running && elapsed < MAX_RUN_MS {
        if autopilot::should_trigger(session.state(), session.tuning()) {
            session.trigger();
        }
        session.advance(FRAME_MS);
        for event in session.drain_events() {
            log::debug!("{:?}", event);
        }
        elapsed += FRAME_MS;
    }
    session.quit();

    if let Some(summary) = session.last_summary() {
        println!("{}", serde_json::to_string_pretty(summary)?);
    }
    Ok(())
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
