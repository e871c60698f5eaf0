//! Cubic Bézier curve evaluation.

use super::ControlPoint;

#[cfg(feature = "app")]
use serde::{Deserialize, Serialize};

/// A cubic Bézier curve defined by four control points.
///
/// The curve starts at `start`, ends at `end`, and is pulled towards
/// `control1` and `control2` in between. It is evaluated with the Bernstein
/// form:
///
/// `P(t) = (1-t)³·P0 + 3t(1-t)²·C1 + 3t²(1-t)·C2 + t³·P3`
///
/// # Examples
///
/// ```
/// use haptic_dynamics::{ControlPoint, CubicBezier};
///
/// let curve = CubicBezier::new(
///     ControlPoint::new(0.0, 0.0),
///     ControlPoint::new(89.0, 73.95),
///     ControlPoint::new(99.0, 140.25),
///     ControlPoint::new(100.0, 255.0),
/// );
///
/// assert_eq!(curve.point_at(0.0), ControlPoint::new(0.0, 0.0));
/// assert_eq!(curve.point_at(1.0), ControlPoint::new(100.0, 255.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "app", derive(Serialize, Deserialize))]
pub struct CubicBezier {
    pub start: ControlPoint,
    pub control1: ControlPoint,
    pub control2: ControlPoint,
    pub end: ControlPoint,
}

impl CubicBezier {
    /// Creates a curve from its start point, two control points, and end point.
    pub const fn new(
        start: ControlPoint,
        control1: ControlPoint,
        control2: ControlPoint,
        end: ControlPoint,
    ) -> Self {
        Self {
            start,
            control1,
            control2,
            end,
        }
    }

    /// Evaluates the curve at parameter `t`.
    ///
    /// `t` is not clamped. Values outside [0, 1] extrapolate the polynomial.
    pub fn point_at(&self, t: f64) -> ControlPoint {
        let u = 1.0 - t;
        let c0 = u * u * u;
        let c1 = 3.0 * t * u * u;
        let c2 = 3.0 * t * t * u;
        let c3 = t * t * t;

        self.start.scale(c0) + self.control1.scale(c1) + self.control2.scale(c2) + self.end.scale(c3)
    }

    /// Returns true when x never decreases from start through both control
    /// points to end.
    ///
    /// This is sufficient for every sampled x to be non-decreasing, which
    /// lookups rely on. Nothing in this crate enforces it at runtime.
    pub fn is_x_monotonic(&self) -> bool {
        self.start.x <= self.control1.x
            && self.control1.x <= self.control2.x
            && self.control2.x <= self.end.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn bow_curve() -> CubicBezier {
        CubicBezier::new(
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(89.0, 73.95),
            ControlPoint::new(99.0, 140.25),
            ControlPoint::new(100.0, 255.0),
        )
    }

    #[test]
    fn test_endpoints_are_exact() {
        let curve = bow_curve();
        assert_eq!(curve.point_at(0.0), curve.start);
        assert_eq!(curve.point_at(1.0), curve.end);
    }

    #[test]
    fn test_midpoint() {
        // At t = 0.5 the Bernstein weights are 1/8, 3/8, 3/8, 1/8
        let p = bow_curve().point_at(0.5);
        assert!(approx_eq(p.x, (0.0 + 3.0 * 89.0 + 3.0 * 99.0 + 100.0) / 8.0));
        assert!(approx_eq(p.y, (0.0 + 3.0 * 73.95 + 3.0 * 140.25 + 255.0) / 8.0));
    }

    #[test]
    fn test_straight_line() {
        let curve = CubicBezier::new(
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(1.0, 1.0),
            ControlPoint::new(2.0, 2.0),
            ControlPoint::new(3.0, 3.0),
        );
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let p = curve.point_at(t);
            assert!(approx_eq(p.x, 3.0 * t));
            assert!(approx_eq(p.y, 3.0 * t));
        }
    }

    #[test]
    fn test_is_x_monotonic() {
        assert!(bow_curve().is_x_monotonic());

        let mut curve = bow_curve();
        curve.control1.x = 120.0;
        assert!(!curve.is_x_monotonic());
    }
}
