//! A haptic player that records commands instead of vibrating.

use std::ops::RangeInclusive;

use tracing::debug;

use super::{Effect, HapticPlayer, Playback};
use crate::{Error, Result};

/// One call received by a [`RecordingPlayer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HapticCommand {
    Initialize,
    Play { effect: Effect, playback: Playback },
    UpdateLoop { amplitude: u8, interval_ms: u32, frequency: i32 },
    Stop,
    Shutdown,
}

/// Playback state tracked by the recording player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uninitialized,
    Idle,
    Looping,
}

/// A [`HapticPlayer`] that logs every accepted command.
///
/// It checks call ordering the same way a real backend would, which makes it
/// useful for testing controllers and for running the demo on machines
/// without haptic hardware. Rejected calls are not recorded.
///
/// Only a looping playback (see [`Repeat::is_looping`](super::Repeat::is_looping))
/// can have its parameters updated. A one-shot effect replaces any running
/// loop and leaves nothing to adjust.
///
/// # Examples
///
/// ```
/// use haptic_dynamics::haptics::{Effect, HapticCommand, HapticPlayer, Playback, RecordingPlayer};
///
/// let mut player = RecordingPlayer::new(1..=20);
/// player.initialize().unwrap();
/// player.play(&Effect::Prebaked(3), Playback::once(255)).unwrap();
///
/// assert_eq!(player.commands().len(), 2);
/// assert!(matches!(player.commands()[1], HapticCommand::Play { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct RecordingPlayer {
    prebaked_ids: RangeInclusive<u32>,
    supported: bool,
    version: String,
    state: State,
    commands: Vec<HapticCommand>,
}

impl RecordingPlayer {
    /// Creates a supported player that accepts the given prebaked ids.
    pub fn new(prebaked_ids: RangeInclusive<u32>) -> Self {
        Self {
            prebaked_ids,
            supported: true,
            version: format!("recording-{}", env!("CARGO_PKG_VERSION")),
            state: State::Uninitialized,
            commands: Vec::new(),
        }
    }

    /// Sets whether the player reports high-fidelity support.
    pub fn with_support(mut self, supported: bool) -> Self {
        self.supported = supported;
        self
    }

    /// All commands accepted so far, oldest first.
    pub fn commands(&self) -> &[HapticCommand] {
        &self.commands
    }

    /// Removes and returns the recorded commands.
    pub fn take_commands(&mut self) -> Vec<HapticCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Whether a looping effect is running.
    pub fn is_looping(&self) -> bool {
        self.state == State::Looping
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.state == State::Uninitialized {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn record(&mut self, command: HapticCommand) {
        debug!(?command, "haptic command");
        self.commands.push(command);
    }
}

impl HapticPlayer for RecordingPlayer {
    fn initialize(&mut self) -> Result<()> {
        self.state = State::Idle;
        self.record(HapticCommand::Initialize);
        Ok(())
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn prebaked_ids(&self) -> RangeInclusive<u32> {
        self.prebaked_ids.clone()
    }

    fn play(&mut self, effect: &Effect, playback: Playback) -> Result<()> {
        self.ensure_initialized()?;
        if let Effect::Prebaked(id) = *effect
            && !self.prebaked_ids.contains(&id)
        {
            return Err(Error::UnknownPrebaked {
                id,
                min: *self.prebaked_ids.start(),
                max: *self.prebaked_ids.end(),
            });
        }

        self.state = if playback.repeat.is_looping() {
            State::Looping
        } else {
            State::Idle
        };
        self.record(HapticCommand::Play {
            effect: effect.clone(),
            playback,
        });
        Ok(())
    }

    fn update_loop_parameters(
        &mut self,
        amplitude: u8,
        interval_ms: u32,
        frequency: i32,
    ) -> Result<()> {
        self.ensure_initialized()?;
        if self.state != State::Looping {
            return Err(Error::NoActiveLoop);
        }
        self.record(HapticCommand::UpdateLoop {
            amplitude,
            interval_ms,
            frequency,
        });
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        self.state = State::Idle;
        self.record(HapticCommand::Stop);
        Ok(())
    }

    fn shutdown(&mut self) {
        if self.state != State::Uninitialized {
            self.state = State::Uninitialized;
            self.record(HapticCommand::Shutdown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_player() -> RecordingPlayer {
        let mut player = RecordingPlayer::new(1..=20);
        player.initialize().unwrap();
        player
    }

    #[test]
    fn test_calls_before_initialize_fail() {
        let mut player = RecordingPlayer::new(1..=20);
        assert!(matches!(
            player.play(&Effect::Prebaked(1), Playback::once(255)),
            Err(Error::NotInitialized)
        ));
        assert!(matches!(player.stop(), Err(Error::NotInitialized)));
        assert!(player.commands().is_empty());
    }

    #[test]
    fn test_update_requires_active_effect() {
        let mut player = ready_player();
        assert!(matches!(
            player.update_loop_parameters(100, 0, 0),
            Err(Error::NoActiveLoop)
        ));

        player
            .play(&Effect::Pattern("{}".into()), Playback::forever(1))
            .unwrap();
        player.update_loop_parameters(100, 0, 0).unwrap();

        player.stop().unwrap();
        assert!(matches!(
            player.update_loop_parameters(100, 0, 0),
            Err(Error::NoActiveLoop)
        ));
    }

    #[test]
    fn test_one_shot_effects_cannot_be_updated() {
        let mut player = ready_player();
        player.play(&Effect::Prebaked(3), Playback::once(255)).unwrap();
        assert!(!player.is_looping());
        assert!(matches!(
            player.update_loop_parameters(10, 0, 0),
            Err(Error::NoActiveLoop)
        ));

        // A one-shot also ends a running loop
        player
            .play(&Effect::Pattern("{}".into()), Playback::looped(3, 50, 100))
            .unwrap();
        assert!(player.is_looping());
        player.update_loop_parameters(10, 0, 0).unwrap();
        player
            .play(&Effect::Pattern("{}".into()), Playback::once(255))
            .unwrap();
        assert!(matches!(
            player.update_loop_parameters(10, 0, 0),
            Err(Error::NoActiveLoop)
        ));
    }

    #[test]
    fn test_prebaked_range_is_checked() {
        let mut player = ready_player();
        player.play(&Effect::Prebaked(20), Playback::once(255)).unwrap();
        let err = player
            .play(&Effect::Prebaked(21), Playback::once(255))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownPrebaked {
                id: 21,
                min: 1,
                max: 20
            }
        ));
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut player = ready_player();
        player.shutdown();
        player.shutdown();
        assert_eq!(
            player.take_commands(),
            vec![HapticCommand::Initialize, HapticCommand::Shutdown]
        );
        assert!(matches!(player.stop(), Err(Error::NotInitialized)));
    }

    #[test]
    fn test_support_flag() {
        assert!(RecordingPlayer::new(0..=0).is_supported());
        assert!(!RecordingPlayer::new(0..=0).with_support(false).is_supported());
    }
}
