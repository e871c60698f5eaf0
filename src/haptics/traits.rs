//! The interface between the demo and a haptic playback backend.

use std::ops::RangeInclusive;

use super::{Effect, Playback};
use crate::Result;

/// A haptic playback backend.
///
/// This is the contract the demo expects from a vendor haptics SDK. Waveform
/// synthesis and device access are entirely the implementation's concern.
///
/// Implementations are expected to reject every call other than
/// [`initialize`](Self::initialize), [`is_supported`](Self::is_supported),
/// [`version`](Self::version) and [`prebaked_ids`](Self::prebaked_ids) with
/// [`Error::NotInitialized`](crate::Error::NotInitialized) until the player is
/// initialized, and again after [`shutdown`](Self::shutdown).
pub trait HapticPlayer {
    /// Prepares the backend for playback.
    fn initialize(&mut self) -> Result<()>;

    /// Whether the device supports high-fidelity haptics.
    ///
    /// Playback still works when this is false, at reduced fidelity.
    fn is_supported(&self) -> bool;

    /// Backend version string, for display.
    fn version(&self) -> &str;

    /// The ids accepted by [`Effect::Prebaked`].
    fn prebaked_ids(&self) -> RangeInclusive<u32>;

    /// Starts playing `effect`, replacing anything already playing.
    fn play(&mut self, effect: &Effect, playback: Playback) -> Result<()>;

    /// Adjusts the effect that is currently looping.
    ///
    /// Fails with [`Error::NoActiveLoop`](crate::Error::NoActiveLoop) when no
    /// looping effect is running, including right after a one-shot effect.
    fn update_loop_parameters(&mut self, amplitude: u8, interval_ms: u32, frequency: i32)
    -> Result<()>;

    /// Stops whatever is playing.
    fn stop(&mut self) -> Result<()>;

    /// Releases the backend. Safe to call more than once.
    fn shutdown(&mut self);
}
