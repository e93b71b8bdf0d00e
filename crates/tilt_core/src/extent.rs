//! Rectangular logical extent of a region

use crate::vector::Vec2;
use serde::{Deserialize, Serialize};

/// Smallest width or height a region may take
pub const MIN_EXTENT: f32 = 1.0;

/// Width and height of a region, in region units (pixels for the reference scenes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Same extent with both sides clamped to at least [`MIN_EXTENT`]
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() { v.max(MIN_EXTENT) } else { MIN_EXTENT };
        let out = Self::new(fix(self.width), fix(self.height));
        if out != self {
            log::warn!(
                "Extent {}x{} is not a valid region size, using {}x{}",
                self.width, self.height, out.width, out.height
            );
        }
        out
    }

    /// Half extents (used by centered coordinate frames)
    pub fn half(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Check if a point lies in `[0, width] x [0, height]`
    pub fn contains_corner_origin(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Check if a point lies in `[-w/2, w/2] x [-h/2, h/2]`
    pub fn contains_centered(&self, p: Vec2) -> bool {
        let h = self.half();
        p.x.abs() <= h.x && p.y.abs() <= h.y
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
