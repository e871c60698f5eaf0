//! Effect descriptors and playback parameters handed to a haptic player.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Largest amplitude a player accepts.
pub const MAX_AMPLITUDE: u8 = 255;

/// What to play.
///
/// Haptic descriptors are opaque to this crate. Their content is passed
/// through to the player without being parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// An HE descriptor given as JSON text
    Pattern(String),
    /// An HE descriptor stored in a file
    File(PathBuf),
    /// An effect built into the player, selected by id
    Prebaked(u32),
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Pattern(text) => write!(f, "pattern ({} bytes)", text.len()),
            Effect::File(path) => write!(f, "file {}", path.display()),
            Effect::Prebaked(id) => write!(f, "prebaked #{}", id),
        }
    }
}

/// How many times an effect repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Play a single time
    #[default]
    Once,
    /// Play the given number of times
    Times(u32),
    /// Keep playing until stopped or replaced by another effect
    Forever,
}

impl Repeat {
    /// The loop count in the player's integer convention: -1 loops forever,
    /// 0 plays once, and n > 0 plays n times.
    pub fn as_loop_count(self) -> i32 {
        match self {
            Repeat::Once => 0,
            Repeat::Times(n) => i32::try_from(n).unwrap_or(i32::MAX),
            Repeat::Forever => -1,
        }
    }

    /// Whether the effect keeps running after its first pass, so that loop
    /// parameters can still be adjusted.
    pub fn is_looping(self) -> bool {
        !matches!(self, Repeat::Once)
    }
}

/// Parameters for a single `play` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playback {
    /// Repetition mode
    pub repeat: Repeat,
    /// Pause between repetitions in milliseconds
    pub interval_ms: u32,
    /// Starting intensity, 1 to 255
    pub amplitude: u8,
    /// Frequency offset applied by the player, 0 leaves it unchanged
    pub frequency: i32,
}

impl Default for Playback {
    fn default() -> Self {
        Self::once(MAX_AMPLITUDE)
    }
}

impl Playback {
    /// A single pass at `amplitude`.
    pub fn once(amplitude: u8) -> Self {
        Self {
            repeat: Repeat::Once,
            interval_ms: 0,
            amplitude,
            frequency: 0,
        }
    }

    /// Loops until stopped, starting at `amplitude`.
    pub fn forever(amplitude: u8) -> Self {
        Self {
            repeat: Repeat::Forever,
            ..Self::once(amplitude)
        }
    }

    /// Plays `times` passes with `interval_ms` between them.
    pub fn looped(times: u32, interval_ms: u32, amplitude: u8) -> Self {
        Self {
            repeat: Repeat::Times(times),
            interval_ms,
            amplitude,
            frequency: 0,
        }
    }

    /// Sets the frequency offset.
    pub fn with_frequency(mut self, frequency: i32) -> Self {
        self.frequency = frequency;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_count_convention() {
        assert_eq!(Repeat::Once.as_loop_count(), 0);
        assert_eq!(Repeat::Forever.as_loop_count(), -1);
        assert_eq!(Repeat::Times(100).as_loop_count(), 100);
        assert_eq!(Repeat::Times(u32::MAX).as_loop_count(), i32::MAX);
    }

    #[test]
    fn test_playback_constructors() {
        let p = Playback::looped(100, 350, 255);
        assert_eq!(p.repeat, Repeat::Times(100));
        assert_eq!(p.interval_ms, 350);
        assert!(p.repeat.is_looping());

        let p = Playback::forever(1).with_frequency(10);
        assert_eq!(p.repeat, Repeat::Forever);
        assert_eq!(p.amplitude, 1);
        assert_eq!(p.frequency, 10);

        assert!(!Playback::default().repeat.is_looping());
    }

    #[test]
    fn test_playback_serde() {
        let p: Playback = serde_json::from_str(r#"{"repeat":{"times":3},"amplitude":80}"#).unwrap();
        assert_eq!(p.repeat, Repeat::Times(3));
        assert_eq!(p.amplitude, 80);
        assert_eq!(p.interval_ms, 0);

        let p: Playback = serde_json::from_str(r#"{"repeat":"forever"}"#).unwrap();
        assert_eq!(p.repeat, Repeat::Forever);
        assert_eq!(p.amplitude, MAX_AMPLITUDE);
    }

    #[test]
    fn test_effect_display() {
        assert_eq!(Effect::Prebaked(7).to_string(), "prebaked #7");
        assert_eq!(Effect::Pattern("{}".into()).to_string(), "pattern (2 bytes)");
    }
}
