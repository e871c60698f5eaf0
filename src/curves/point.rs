//! Two-dimensional points for curve definitions.

#[cfg(feature = "app")]
use serde::{Deserialize, Serialize};

/// A point in the curve plane.
///
/// For the bow-drag curve, `x` is the slider position and `y` is the
/// vibration amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "app", derive(Serialize, Deserialize))]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
}

impl ControlPoint {
    /// Creates a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use haptic_dynamics::ControlPoint;
    ///
    /// let p = ControlPoint::new(89.0, 73.95);
    /// assert_eq!(p.x, 89.0);
    /// assert_eq!(p.y, 73.95);
    /// ```
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point scaled by `factor` on both axes.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl std::ops::Add for ControlPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(f64, f64)> for ControlPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
