//! Haptic playback: effect descriptors, the player interface, and a
//! recording player for tests and hardware-free runs.

mod effect;
mod recording;
mod traits;

pub use effect::{Effect, MAX_AMPLITUDE, Playback, Repeat};
pub use recording::{HapticCommand, RecordingPlayer};
pub use traits::HapticPlayer;
