//! Precomputed sample tables for answering "y at x" queries.
//!
//! Solving a cubic Bézier for y given x has no cheap closed form, so the
//! curve is sampled once into a table and queries search the table instead.

use super::{ControlPoint, CubicBezier};

/// Number of parameter steps used when no other count is given.
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// A sample matches a query when its x is strictly closer than this.
pub const LOOKUP_TOLERANCE: f64 = 1.0;

/// A cubic Bézier curve sampled at evenly spaced parameter values.
///
/// The table holds `sample_count + 1` points for `t = i / sample_count`,
/// `i = 0..=sample_count`. It is built once and never changes, so it can be
/// shared freely between threads.
///
/// Lookups assume the table is sorted by x. This holds when the control
/// points' x never decreases (see [`CubicBezier::is_x_monotonic`]). The
/// table does not check it.
///
/// Equal steps in `t` do not give equal steps in x. Where the curve moves
/// quickly in x, neighbouring samples can be more than
/// [`LOOKUP_TOLERANCE`] apart, and queries that land between them miss.
/// Raising the sample count narrows those gaps.
///
/// # Examples
///
/// ```
/// use haptic_dynamics::{ControlPoint, CubicBezier, SampledCurve};
///
/// let bezier = CubicBezier::new(
///     ControlPoint::new(0.0, 0.0),
///     ControlPoint::new(89.0, 73.95),
///     ControlPoint::new(99.0, 140.25),
///     ControlPoint::new(100.0, 255.0),
/// );
/// let curve = SampledCurve::build(&bezier, 100);
///
/// assert_eq!(curve.lookup(0), Some(0));
/// assert_eq!(curve.lookup(100), Some(255));
/// assert_eq!(curve.lookup(101), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampledCurve {
    bezier: CubicBezier,
    points: Vec<ControlPoint>,
}

/// Builds a sample table from four control points.
///
/// Equivalent to `SampledCurve::build(&CubicBezier::new(p0, c1, c2, p3), sample_count)`.
pub fn build_curve(
    p0: ControlPoint,
    c1: ControlPoint,
    c2: ControlPoint,
    p3: ControlPoint,
    sample_count: usize,
) -> SampledCurve {
    SampledCurve::build(&CubicBezier::new(p0, c1, c2, p3), sample_count)
}

impl SampledCurve {
    /// Samples `bezier` at `sample_count + 1` evenly spaced values of `t`.
    ///
    /// A `sample_count` of zero is treated as one, so the table always holds
    /// at least the start and end points.
    pub fn build(bezier: &CubicBezier, sample_count: usize) -> Self {
        let steps = sample_count.max(1);
        let points = (0..=steps)
            .map(|i| bezier.point_at(i as f64 / steps as f64))
            .collect();

        Self {
            bezier: *bezier,
            points,
        }
    }

    /// Returns the y of the sample closest to `x`, truncated towards zero.
    ///
    /// Returns `None` when no sample's x is within [`LOOKUP_TOLERANCE`] of
    /// `x`. That covers queries outside the curve's x range and queries
    /// that fall into a sampling gap.
    pub fn lookup(&self, x: i32) -> Option<i32> {
        self.lookup_f64(f64::from(x)).map(|y| y as i32)
    }

    /// Like [`lookup`](Self::lookup) but without integer coercion on either side.
    pub fn lookup_f64(&self, x: f64) -> Option<f64> {
        self.find_index(x).map(|i| self.points[i].y)
    }

    /// Binary search for the sample nearest to `x` in x, within tolerance.
    fn find_index(&self, x: f64) -> Option<usize> {
        // First index whose x is not below the query
        let low = self.points.partition_point(|p| p.x < x);

        // The nearest sample is on one side of the insertion point or the
        // other. Ties go to the lower index.
        let below = low.checked_sub(1);
        let above = (low < self.points.len()).then_some(low);
        let distance = |i: usize| (self.points[i].x - x).abs();

        let nearest = match (below, above) {
            (Some(b), Some(a)) => {
                if distance(a) < distance(b) {
                    a
                } else {
                    b
                }
            }
            (Some(b), None) => b,
            (None, Some(a)) => a,
            (None, None) => return None,
        };

        (distance(nearest) < LOOKUP_TOLERANCE).then_some(nearest)
    }

    /// The curve this table was sampled from.
    pub fn bezier(&self) -> &CubicBezier {
        &self.bezier
    }

    /// All samples, ordered by increasing `t`.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Number of parameter steps. The table holds one more point than this.
    pub fn sample_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Number of points in the table.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, since a table holds at least the two endpoints.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The x values of the first and last samples.
    pub fn x_range(&self) -> (f64, f64) {
        (self.points[0].x, self.points[self.points.len() - 1].x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bow_curve() -> SampledCurve {
        build_curve(
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(89.0, 73.95),
            ControlPoint::new(99.0, 140.25),
            ControlPoint::new(100.0, 255.0),
            DEFAULT_SAMPLE_COUNT,
        )
    }

    fn line(sample_count: usize) -> SampledCurve {
        build_curve(
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(10.0, 10.0),
            ControlPoint::new(20.0, 20.0),
            ControlPoint::new(30.0, 30.0),
            sample_count,
        )
    }

    #[test]
    fn test_table_size() {
        let curve = bow_curve();
        assert_eq!(curve.len(), 101);
        assert_eq!(curve.sample_count(), 100);
        assert!(!curve.is_empty());
        assert_eq!(curve.x_range(), (0.0, 100.0));
    }

    #[test]
    fn test_zero_sample_count_keeps_endpoints() {
        let curve = line(0);
        assert_eq!(curve.len(), 2);
        assert_eq!(curve.points()[0], ControlPoint::new(0.0, 0.0));
        assert_eq!(curve.points()[1], ControlPoint::new(30.0, 30.0));
    }

    #[test]
    fn test_lookup_endpoints() {
        let curve = bow_curve();
        assert_eq!(curve.lookup(0), Some(0));
        assert_eq!(curve.lookup(100), Some(255));
    }

    #[test]
    fn test_lookup_out_of_range() {
        let curve = bow_curve();
        assert_eq!(curve.lookup(-1), None);
        assert_eq!(curve.lookup(101), None);
        assert_eq!(curve.lookup(i32::MIN), None);
        assert_eq!(curve.lookup(i32::MAX), None);
    }

    #[test]
    fn test_lookup_picks_nearest_sample() {
        // Samples of a straight line sit every 0.3 units
        let curve = line(100);
        assert_eq!(curve.lookup_f64(15.0), Some(15.0));
        let y = curve.lookup_f64(15.1).unwrap();
        assert!((y - 15.0).abs() < 1e-9);
        let y = curve.lookup_f64(15.2).unwrap();
        assert!((y - 15.3).abs() < 1e-9);
    }

    #[test]
    fn test_lookup_tie_goes_to_lower_sample() {
        // Samples at x = 0, 1.5 and 3
        let curve = build_curve(
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(1.0, 1.0),
            ControlPoint::new(2.0, 2.0),
            ControlPoint::new(3.0, 3.0),
            2,
        );
        assert_eq!(curve.lookup_f64(0.75), Some(0.0));
        assert_eq!(curve.lookup_f64(2.25), Some(1.5));
        assert_eq!(curve.lookup_f64(1.5), Some(1.5));
    }

    #[test]
    fn test_lookup_misses_in_sampling_gap() {
        // Four steps over 30 units leaves 7.5 unit gaps
        let curve = line(4);
        assert_eq!(curve.lookup_f64(7.5), Some(7.5));
        assert_eq!(curve.lookup_f64(3.75), None);
        assert_eq!(curve.lookup(4), None);
    }

    #[test]
    fn test_bow_curve_misses_where_x_moves_fast() {
        // Near t = 0 the first step jumps about 2.6 units in x
        let curve = bow_curve();
        let second = curve.points()[1].x;
        assert!(second > 2.0);
        assert_eq!(curve.lookup(1), None);
    }

    #[test]
    fn test_lookup_truncates_towards_zero() {
        let curve = build_curve(
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(1.0, -1.0),
            ControlPoint::new(2.0, -2.0),
            ControlPoint::new(3.0, -2.7),
            3,
        );
        // y at the last sample is -2.7
        assert_eq!(curve.lookup(3), Some(-2));
    }

    #[test]
    fn test_bezier_is_kept() {
        let curve = bow_curve();
        assert_eq!(curve.bezier().end, ControlPoint::new(100.0, 255.0));
    }
}
