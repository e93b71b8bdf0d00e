//! Frame timing
//!
//! A [`FrameClock`] is ticked once per animation frame by the host and
//! produces a [`FrameContext`]. The context is passed by reference into
//! every `step`/`advance` call, so no region reads time or orientation
//! from global state.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! loop {
//!     let ctx = clock.tick(latest_tilt.take());
//!     scenes.advance(&ctx);
//! }
//! ```

use std::time::Instant;

use crate::tilt::Tilt;
use crate::vector::Vec2;

/// Longest delta a single frame may integrate (seconds)
pub const DEFAULT_MAX_DELTA: f32 = 0.25;

/// Per-frame input handed to regions and the orchestrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Seconds since the clock started
    pub elapsed: f32,
    /// Seconds since the previous frame
    pub delta: f32,
    /// Tilt sample received since the previous frame, if any
    pub tilt: Option<Tilt>,
}

impl FrameContext {
    /// Context for a single frame with an explicit delta (tests, fixed-step hosts)
    pub fn with_delta(delta: f32) -> Self {
        Self {
            frame: 1,
            elapsed: delta,
            delta,
            tilt: None,
        }
    }

    /// Attach a tilt sample
    pub fn with_tilt(mut self, tilt: Tilt) -> Self {
        self.tilt = Some(tilt);
        self
    }

    /// Gravity direction requested this frame
    pub fn gravity_direction(&self) -> Option<Vec2> {
        self.tilt.map(|t| t.gravity_direction())
    }
}

/// Monotonic frame clock
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    frame: u64,
    elapsed: f32,
    max_delta: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frame: 0,
            elapsed: 0.0,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }

    /// Set the longest delta a frame may report
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = if max_delta.is_finite() && max_delta > 0.0 {
            max_delta
        } else {
            log::warn!("Ignoring invalid max frame delta {}", max_delta);
            DEFAULT_MAX_DELTA
        };
        self
    }

    /// Advance using wall-clock time
    pub fn tick(&mut self, tilt: Option<Tilt>) -> FrameContext {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(delta, tilt)
    }

    /// Advance by an explicit delta in seconds
    pub fn tick_seconds(&mut self, delta: f32, tilt: Option<Tilt>) -> FrameContext {
        self.last_frame = Instant::now();
        self.advance(delta, tilt)
    }

    /// Advance by an explicit delta in milliseconds
    pub fn tick_millis(&mut self, delta_ms: f32, tilt: Option<Tilt>) -> FrameContext {
        self.tick_seconds(delta_ms / 1000.0, tilt)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn advance(&mut self, delta: f32, tilt: Option<Tilt>) -> FrameContext {
        let delta = if delta.is_finite() {
            delta.clamp(0.0, self.max_delta)
        } else {
            0.0
        };
        self.frame += 1;
        self.elapsed += delta;
        FrameContext {
            frame: self.frame,
            elapsed: self.elapsed,
            delta,
            tilt,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tick_millis_converts_to_seconds() {
        let mut clock = FrameClock::new();
        let ctx = clock.tick_millis(16.0, None);
        assert_eq!(ctx.frame, 1);
        assert_relative_eq!(ctx.delta, 0.016);
        let ctx = clock.tick_millis(16.0, None);
        assert_eq!(ctx.frame, 2);
        assert_relative_eq!(ctx.elapsed, 0.032);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut clock = FrameClock::new().with_max_delta(0.1);
        assert_relative_eq!(clock.tick_seconds(5.0, None).delta, 0.1);
        assert_eq!(clock.tick_seconds(-1.0, None).delta, 0.0);
        assert_eq!(clock.tick_seconds(f32::NAN, None).delta, 0.0);
    }

    #[test]
    fn test_tilt_is_forwarded() {
        let mut clock = FrameClock::new();
        let ctx = clock.tick_seconds(0.016, Some(Tilt::new(90.0, 0.0)));
        assert_eq!(ctx.gravity_direction(), Some(Vec2::new(0.0, 1.0)));
    }
}
