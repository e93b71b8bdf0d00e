//! Published frame state and the status reporter

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::RwLock;
use tilt_core::{FrameContext, Tilt};
use tilt_scenes::{LinkedScenes, RegionId, TransferReport};

/// What the frame thread publishes after every frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub elapsed: f32,
    /// Entity count per region, in region order
    pub counts: Vec<(RegionId, usize)>,
    pub transfers: u64,
    pub stale: u64,
    pub tilt: Option<Tilt>,
}

impl FrameSnapshot {
    /// Fold one finished frame into the snapshot
    pub fn record(&mut self, frame: &FrameContext, scenes: &LinkedScenes, report: &TransferReport) {
        self.frame = frame.frame;
        self.elapsed = frame.elapsed;
        self.counts = scenes.regions().map(|r| (r.id(), r.entity_count())).collect();
        self.transfers += report.len() as u64;
        self.stale += report.stale as u64;
        if frame.tilt.is_some() {
            self.tilt = frame.tilt;
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// One-line summary
    pub fn status_line(&self) -> String {
        let counts: Vec<String> = self.counts.iter().map(|(id, n)| format!("{}={}", id, n)).collect();
        let tilt = match self.tilt {
            Some(t) => format!("beta {:.0} gamma {:.0}", t.beta, t.gamma),
            None => "flat".to_string(),
        };
        format!(
            "frame {} t={:.1}s [{}] total={} transfers={} tilt: {}",
            self.frame,
            self.elapsed,
            counts.join(" "),
            self.total(),
            self.transfers,
            tilt
        )
    }
}

/// Shared, lock-protected snapshot
pub type SharedSnapshot = Arc<RwLock<FrameSnapshot>>;

/// Log the snapshot every `interval` until `running` clears
pub fn spawn_reporter(snapshot: SharedSnapshot, running: Arc<AtomicBool>, interval: Duration) -> Option<JoinHandle<()>> {
    let spawned = thread::Builder::new().name("tilt-status".to_string()).spawn(move || {
        let tick = interval.min(Duration::from_millis(100));
        let mut waited = Duration::ZERO;
        while running.load(Ordering::SeqCst) {
            thread::sleep(tick);
            waited += tick;
            if waited >= interval {
                waited = Duration::ZERO;
                log::info!("{}", snapshot.read().status_line());
            }
        }
    });
    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("Failed to start status reporter: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilt_core::SimulationConfig;
    use tilt_physics::PhysicsConfig;
    use tilt_scenes::LayoutConfig;

    #[test]
    fn test_record_accumulates() {
        let scenes = LinkedScenes::new(
            LayoutConfig::default(),
            PhysicsConfig::default(),
            SimulationConfig::default(),
            Some(1),
        )
        .unwrap();
        let mut snapshot = FrameSnapshot::default();
        let report = TransferReport {
            events: Vec::new(),
            stale: 2,
        };

        let frame = FrameContext::with_delta(0.016).with_tilt(Tilt::new(10.0, 20.0));
        snapshot.record(&frame, &scenes, &report);
        snapshot.record(&FrameContext::with_delta(0.016), &scenes, &report);

        assert_eq!(snapshot.total(), 16);
        assert_eq!(snapshot.stale, 4);
        assert_eq!(snapshot.tilt, Some(Tilt::new(10.0, 20.0)));
        assert!(snapshot.status_line().contains("middle=10"));
    }
}
