//! Tilt input thread
//!
//! Samples are produced off the frame thread and delivered over a
//! channel; the frame loop only keeps the newest one.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use tilt_core::Tilt;

use crate::boot_config::TiltSource;

/// Samples buffered before the producer starts dropping
const CHANNEL_CAPACITY: usize = 64;

/// Interval between synthetic samples
const SWEEP_INTERVAL: Duration = Duration::from_millis(50);

/// Running tilt producer
pub struct TiltInput {
    rx: Receiver<Tilt>,
    handle: Option<JoinHandle<()>>,
}

impl TiltInput {
    /// Start the producer for `source`
    pub fn spawn(source: TiltSource, running: Arc<AtomicBool>) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(CHANNEL_CAPACITY);

        let handle = match source {
            TiltSource::Sweep => spawn_named("tilt-sweep", move || run_sweep(tx, running)),
            // Blocks on stdin, so it is never joined
            TiltSource::Stdin => {
                spawn_named("tilt-stdin", move || run_stdin(tx, running));
                None
            }
            TiltSource::None => None,
        };

        Self { rx, handle }
    }

    /// Newest sample since the last call, if any
    pub fn latest(&self) -> Option<Tilt> {
        self.rx.try_iter().last()
    }

    /// Wait for the producer to stop
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Tilt input thread panicked");
            }
        }
    }
}

fn spawn_named<F: FnOnce() + Send + 'static>(name: &str, f: F) -> Option<JoinHandle<()>> {
    match thread::Builder::new().name(name.to_string()).spawn(f) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("Failed to start {} thread: {}", name, e);
            None
        }
    }
}

/// Push a sample; returns false once the receiver is gone
fn send(tx: &Sender<Tilt>, tilt: Tilt) -> bool {
    match tx.try_send(tilt) {
        Ok(()) | Err(TrySendError::Full(_)) => true,
        Err(TrySendError::Disconnected(_)) => false,
    }
}

/// Tilt of a device rocked slowly in both axes, at `t` seconds
pub fn sweep_sample(t: f32) -> Tilt {
    let beta = 60.0 * (t * 0.35).sin();
    let gamma = 45.0 * (t * 0.6).sin();
    Tilt::new(beta, gamma)
}

fn run_sweep(tx: Sender<Tilt>, running: Arc<AtomicBool>) {
    let start = Instant::now();
    while running.load(Ordering::SeqCst) {
        if !send(&tx, sweep_sample(start.elapsed().as_secs_f32())) {
            break;
        }
        thread::sleep(SWEEP_INTERVAL);
    }
    log::debug!("Tilt sweep stopped");
}

/// Parse `beta gamma` (degrees, whitespace or comma separated)
pub fn parse_sample(line: &str) -> Option<Tilt> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let beta = parts.next()?.parse().ok()?;
    let gamma = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Tilt::new(beta, gamma))
}

fn run_stdin(tx: Sender<Tilt>, running: Arc<AtomicBool>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Stopped reading tilt from stdin: {}", e);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_sample(line) {
            Some(tilt) => {
                if !send(&tx, tilt) {
                    break;
                }
            }
            None => log::warn!("Ignoring tilt line {:?}, expected \"beta gamma\"", line),
        }
    }
}
