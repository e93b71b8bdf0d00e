//! Device tilt samples and the gravity direction derived from them

use serde::{Deserialize, Serialize};

use crate::vector::Vec2;

/// Degrees of tilt that map to a full unit of gravity on one axis
pub const FULL_TILT_DEGREES: f32 = 90.0;

/// One orientation sample, in degrees
///
/// `beta` is the front/back tilt, `gamma` the left/right tilt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tilt {
    pub beta: f32,
    pub gamma: f32,
}

impl Tilt {
    pub const fn new(beta: f32, gamma: f32) -> Self {
        Self { beta, gamma }
    }

    /// Gravity direction in screen space (y grows downward), each component in `[-1, 1]`
    ///
    /// Non-finite angles contribute zero on their axis.
    pub fn gravity_direction(&self) -> Vec2 {
        let axis = |deg: f32| {
            if deg.is_finite() {
                (deg / FULL_TILT_DEGREES).clamp(-1.0, 1.0)
            } else {
                0.0
            }
        };
        Vec2::new(axis(self.gamma), axis(self.beta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_device_has_no_gravity() {
        assert_eq!(Tilt::default().gravity_direction(), Vec2::ZERO);
    }

    #[test]
    fn test_direction_is_clamped() {
        let dir = Tilt::new(45.0, -180.0).gravity_direction();
        assert_relative_eq!(dir.x, -1.0);
        assert_relative_eq!(dir.y, 0.5);
    }

    #[test]
    fn test_nan_axis_is_zero() {
        let dir = Tilt::new(f32::NAN, 30.0).gravity_direction();
        assert_eq!(dir.y, 0.0);
        assert_relative_eq!(dir.x, 1.0 / 3.0);
    }
}
