//! Haptic Dynamics - Bézier-shaped vibration intensity for haptic demos
//!
//! The core of this crate maps a linear control, such as a slider position,
//! to a non-linear vibration amplitude through a sampled cubic Bézier curve.
//! With the `app` feature (on by default) it also provides the demo around
//! that curve: a haptic player interface, asset loading, configuration and a
//! UI controller.

pub mod curves;

#[cfg(feature = "app")]
pub mod assets;
#[cfg(feature = "app")]
pub mod config;
#[cfg(feature = "app")]
pub mod controller;
#[cfg(feature = "app")]
mod error;
#[cfg(feature = "app")]
pub mod haptics;

// Re-export commonly used types at the crate root
pub use curves::{ControlPoint, CubicBezier, SampledCurve, build_curve};

#[cfg(feature = "app")]
pub use config::DemoConfig;
#[cfg(feature = "app")]
pub use controller::{BowDemo, UiEvent};
#[cfg(feature = "app")]
pub use error::{Error, Result};

#[cfg(feature = "macros")]
pub use haptic_dynamics_macros::bezier;
