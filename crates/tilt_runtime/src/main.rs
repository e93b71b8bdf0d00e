//! Tilt Runtime
//!
//! Headless host for the linked scenes. The frame thread owns the scenes;
//! a tilt input thread feeds orientation samples over a channel and a
//! status thread reads the published snapshot.
//!
//! Run with: cargo run -p tilt_runtime -- 600
//!       or: TILT_TILT=stdin cargo run --bin tilt

mod boot_config;
mod input;
mod status;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tilt_core::FrameClock;
use tilt_scenes::LinkedScenes;

use boot_config::BootConfig;
use input::TiltInput;
use status::{FrameSnapshot, SharedSnapshot};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("PANIC: {}", panic_info);
    }));

    let config = BootConfig::load();
    config.print_summary();

    let scenes = match LinkedScenes::new(
        config.layout,
        config.physics.clone(),
        config.simulation.clone(),
        config.seed,
    ) {
        Ok(scenes) => scenes,
        Err(e) => {
            log::error!("Failed to build scenes: {}", e);
            std::process::exit(1);
        }
    };

    // Install signal handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        log::info!("Received Ctrl+C, shutting down...");
        r.store(false, Ordering::SeqCst);
    }) {
        log::warn!("Failed to set Ctrl+C handler: {}", e);
    }

    let snapshot: SharedSnapshot = Arc::new(RwLock::new(FrameSnapshot::default()));
    let reporter = status::spawn_reporter(
        snapshot.clone(),
        running.clone(),
        Duration::from_secs_f32(config.status_interval),
    );
    let input = TiltInput::spawn(config.tilt, running.clone());

    run_frames(&config, scenes, &input, &snapshot, &running);

    running.store(false, Ordering::SeqCst);
    input.join();
    if let Some(handle) = reporter {
        if handle.join().is_err() {
            log::warn!("Status reporter panicked");
        }
    }

    let last = snapshot.read();
    log::info!("Stopped: {}", last.status_line());
    if last.stale > 0 {
        log::info!("{} stale transfer matches were skipped", last.stale);
    }
}

/// Frame loop: tilt, step, transfer, publish
fn run_frames(
    config: &BootConfig,
    mut scenes: LinkedScenes,
    input: &TiltInput,
    snapshot: &SharedSnapshot,
    running: &AtomicBool,
) {
    let frame_time = Duration::from_secs_f32(config.frame_time());
    let mut clock = FrameClock::new().with_max_delta(config.max_frame_delta);

    log::info!("Running linked scenes. Press Ctrl+C to exit");

    while running.load(Ordering::SeqCst) {
        if config.frames.is_some_and(|limit| clock.frame() >= limit) {
            log::info!("Frame limit reached");
            break;
        }
        let started = Instant::now();

        let tilt = input.latest();
        let frame = if config.fixed_step {
            clock.tick_seconds(config.frame_time(), tilt)
        } else {
            clock.tick(tilt)
        };
        let report = scenes.advance(&frame);

        for event in &report.events {
            log::debug!("{} moved {} -> {}", event.rule, event.removed, event.spawned);
        }
        snapshot.write().record(&frame, &scenes, &report);

        if !config.fixed_step {
            if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }
}
