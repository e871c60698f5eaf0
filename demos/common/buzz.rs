//! A haptic player that plays vibrations as an audible buzz.
//!
//! Descriptors are not interpreted. Every effect is a fixed-length burst of
//! a low sine tone at the requested amplitude, repeated as the playback
//! asks. That is enough to hear the bow-drag amplitude change without any
//! haptic hardware.

use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use haptic_dynamics::haptics::{Effect, HapticPlayer, MAX_AMPLITUDE, Playback, Repeat};
use haptic_dynamics::{Error, Result};
use tracing::debug;

/// Tone frequency, close to a phone's vibration motor
const BUZZ_HZ: f64 = 170.0;
/// Output level at full amplitude
const BUZZ_GAIN: f64 = 0.3;

struct ActiveEffect {
    burst_samples: u32,
    interval_samples: u32,
    position: u32,
    /// Passes left after the current one, None for endless
    remaining: Option<u32>,
    amplitude: u8,
    looping: bool,
}

pub struct BuzzPlayer {
    sample_rate: u32,
    prebaked_ids: RangeInclusive<u32>,
    initialized: bool,
    active: Option<ActiveEffect>,
    phase: f64,
}

impl BuzzPlayer {
    pub fn new(sample_rate: u32, prebaked_ids: RangeInclusive<u32>) -> Self {
        Self {
            sample_rate,
            prebaked_ids,
            initialized: false,
            active: None,
            phase: 0.0,
        }
    }

    pub fn amplitude(&self) -> Option<u8> {
        self.active.as_ref().map(|a| a.amplitude)
    }

    pub fn next_sample(&mut self) -> f64 {
        let Some(active) = self.active.as_mut() else {
            return 0.0;
        };

        let period = active.burst_samples + active.interval_samples;
        let sounding = active.position < active.burst_samples;
        let level = f64::from(active.amplitude) / f64::from(MAX_AMPLITUDE);

        let mut finished = false;
        active.position += 1;
        if active.position >= period {
            active.position = 0;
            match &mut active.remaining {
                None => {}
                Some(0) => finished = true,
                Some(n) => *n -= 1,
            }
        }
        if finished {
            self.active = None;
        }

        self.phase = (self.phase + TAU * BUZZ_HZ / f64::from(self.sample_rate)) % TAU;
        if sounding {
            self.phase.sin() * level * BUZZ_GAIN
        } else {
            0.0
        }
    }

    fn ms_to_samples(&self, ms: u32) -> u32 {
        (u64::from(ms) * u64::from(self.sample_rate) / 1000) as u32
    }

    fn ensure_initialized(&self) -> Result<()> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }
}

/// Burst length for each kind of effect
fn burst_ms(effect: &Effect) -> u32 {
    match effect {
        Effect::Pattern(_) => 100,
        Effect::File(_) => 120,
        Effect::Prebaked(_) => 60,
    }
}

impl HapticPlayer for BuzzPlayer {
    fn initialize(&mut self) -> Result<()> {
        self.initialized = true;
        Ok(())
    }

    fn is_supported(&self) -> bool {
        // Audio can only stand in for low-fidelity haptics
        false
    }

    fn version(&self) -> &str {
        "buzz (audio stand-in)"
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

        debug!(%effect, ?playback, "buzz");
        let remaining = match playback.repeat {
            Repeat::Once => Some(0),
            Repeat::Times(n) => Some(n.saturating_sub(1)),
            Repeat::Forever => None,
        };
        self.active = Some(ActiveEffect {
            burst_samples: self.ms_to_samples(burst_ms(effect)).max(1),
            interval_samples: self.ms_to_samples(playback.interval_ms),
            position: 0,
            remaining,
            amplitude: playback.amplitude,
            looping: playback.repeat.is_looping(),
        });
        Ok(())
    }

    fn update_loop_parameters(
        &mut self,
        amplitude: u8,
        interval_ms: u32,
        _frequency: i32,
    ) -> Result<()> {
        self.ensure_initialized()?;
        let interval_samples = self.ms_to_samples(interval_ms);
        let active = self
            .active
            .as_mut()
            .filter(|a| a.looping)
            .ok_or(Error::NoActiveLoop)?;
        active.amplitude = amplitude;
        active.interval_samples = interval_samples;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        self.active = None;
        Ok(())
    }

    fn shutdown(&mut self) {
        self.active = None;
        self.initialized = false;
    }
}
