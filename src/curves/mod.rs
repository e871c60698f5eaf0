//! Cubic Bézier curves and the sample tables used to query them.
//!
//! A curve is defined once from four control points, sampled into a dense
//! table, and then queried by x. The bow-drag demo uses this to turn a
//! linear slider position into a non-linear vibration amplitude.

mod bezier;
mod point;
mod sampler;

pub use bezier::CubicBezier;
pub use point::ControlPoint;
pub use sampler::{DEFAULT_SAMPLE_COUNT, LOOKUP_TOLERANCE, SampledCurve, build_curve};
