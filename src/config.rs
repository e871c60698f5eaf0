//! Demo configuration.
//!
//! Every field has a default matching the stock bow-drag demo, so a config
//! file only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::curves::{ControlPoint, CubicBezier, DEFAULT_SAMPLE_COUNT, SampledCurve};
use crate::haptics::{MAX_AMPLITUDE, Playback};
use crate::{Error, Result};

/// Largest curve sample count a configuration may ask for.
pub const MAX_SAMPLE_COUNT: usize = 100_000;

/// Top-level configuration for [`BowDemo`](crate::BowDemo).
///
/// # Examples
///
/// ```
/// use haptic_dynamics::DemoConfig;
///
/// let config = DemoConfig::from_json_str(r#"{ "curve": { "sample_count": 400 } }"#).unwrap();
/// assert_eq!(config.curve.sample_count, 400);
/// assert_eq!(config.assets.bow_drag, "bow_drag.he");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Slider position to amplitude mapping.
    pub curve: CurveConfig,
    /// Asset file names.
    pub assets: AssetNames,
    /// Settings for the looping effect played while the slider is held.
    pub drag: DragConfig,
    /// Effect played once when the slider is let go.
    pub release: Playback,
    /// Looping effect started from the loop button.
    pub heartbeat: Playback,
    /// Amplitude used for prebaked effects.
    pub prebaked_amplitude: u8,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            curve: CurveConfig::default(),
            assets: AssetNames::default(),
            drag: DragConfig::default(),
            release: Playback::once(MAX_AMPLITUDE),
            heartbeat: Playback::looped(100, 350, MAX_AMPLITUDE),
            prebaked_amplitude: MAX_AMPLITUDE,
        }
    }
}

impl DemoConfig {
    /// Parses a configuration from JSON text.
    ///
    /// Fails with [`Error::Config`] on malformed JSON and with
    /// [`Error::SampleCount`] when the curve asks for more than
    /// [`MAX_SAMPLE_COUNT`] samples.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        self.curve.validate()
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Control points and resolution of the amplitude curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub bezier: CubicBezier,
    pub sample_count: usize,
}

impl Default for CurveConfig {
    /// A curve from (0, 0) to (100, 255) that stays low for most of the
    /// slider's travel and rises steeply near the end.
    fn default() -> Self {
        Self {
            bezier: CubicBezier::new(
                ControlPoint::new(0.0, 0.0),
                ControlPoint::new(89.0, 73.95),
                ControlPoint::new(99.0, 140.25),
                ControlPoint::new(100.0, 255.0),
            ),
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl CurveConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sample_count > MAX_SAMPLE_COUNT {
            return Err(Error::SampleCount {
                count: self.sample_count,
                max: MAX_SAMPLE_COUNT,
            });
        }
        Ok(())
    }

    /// Samples the configured curve, after checking the sample count.
    pub fn build(&self) -> Result<SampledCurve> {
        self.validate()?;
        Ok(SampledCurve::build(&self.bezier, self.sample_count))
    }
}

/// File names of the HE descriptors used by the demo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetNames {
    pub bow_drag: String,
    pub bow_release: String,
    pub heartbeat: String,
}

impl Default for AssetNames {
    fn default() -> Self {
        Self {
            bow_drag: "bow_drag.he".to_string(),
            bow_release: "bow_release.he".to_string(),
            heartbeat: "heartbeat.he".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Amplitude when the drag starts, before the slider has moved
    pub initial_amplitude: u8,
    /// Interval sent with every amplitude update
    pub loop_interval_ms: u32,
    /// Frequency offset sent with every amplitude update
    pub frequency: i32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            initial_amplitude: 1,
            loop_interval_ms: 0,
            frequency: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haptics::Repeat;

    #[test]
    fn test_defaults() {
        let config = DemoConfig::default();
        assert_eq!(config.curve.sample_count, 100);
        assert_eq!(config.curve.bezier.control1, ControlPoint::new(89.0, 73.95));
        assert_eq!(config.drag.initial_amplitude, 1);
        assert_eq!(config.release.repeat, Repeat::Once);
        assert_eq!(config.heartbeat.repeat, Repeat::Times(100));
        assert_eq!(config.heartbeat.interval_ms, 350);
        assert_eq!(config.heartbeat.amplitude, 255);
        assert_eq!(config.prebaked_amplitude, 255);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DemoConfig::from_json_str(
            r#"{
                "assets": { "heartbeat": "pulse.he" },
                "drag": { "loop_interval_ms": 20 },
                "curve": { "bezier": {
                    "start": { "x": 0, "y": 0 },
                    "control1": { "x": 10, "y": 200 },
                    "control2": { "x": 20, "y": 250 },
                    "end": { "x": 50, "y": 255 }
                } }
            }"#,
        )
        .unwrap();
        assert_eq!(config.assets.heartbeat, "pulse.he");
        assert_eq!(config.assets.bow_drag, "bow_drag.he");
        assert_eq!(config.drag.loop_interval_ms, 20);
        assert_eq!(config.drag.initial_amplitude, 1);
        assert_eq!(config.curve.bezier.end, ControlPoint::new(50.0, 255.0));
        assert_eq!(config.curve.sample_count, 100);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            DemoConfig::from_json_str("{ \"curve\": 3 }"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            DemoConfig::from_json_str("{"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = DemoConfig::default();
        let text = config.to_json_string().unwrap();
        assert_eq!(DemoConfig::from_json_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = DemoConfig::from_path("/nonexistent/haptic-demo.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_curve_build() {
        let curve = CurveConfig::default().build().unwrap();
        assert_eq!(curve.lookup(100), Some(255));
    }

    #[test]
    fn test_sample_count_is_bounded() {
        let err = DemoConfig::from_json_str(r#"{"curve":{"sample_count":18446744073709551615}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::SampleCount {
                count: usize::MAX,
                max: MAX_SAMPLE_COUNT
            }
        ));

        let config = DemoConfig::from_json_str(r#"{"curve":{"sample_count":100000}}"#).unwrap();
        assert_eq!(config.curve.build().unwrap().len(), MAX_SAMPLE_COUNT + 1);

        let curve = CurveConfig {
            sample_count: MAX_SAMPLE_COUNT + 1,
            ..CurveConfig::default()
        };
        assert!(matches!(curve.build(), Err(Error::SampleCount { .. })));
    }
}
