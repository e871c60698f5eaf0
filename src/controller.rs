//! UI controller for the bow-drag demo.
//!
//! The controller owns all state the screen needs: the amplitude curve,
//! the loaded descriptors, the slider position and the selected prebaked
//! effect. A UI layer feeds it [`UiEvent`]s and reads the display strings
//! back. It never touches a toolkit directly.
//!
//! # Bow drag
//!
//! Pressing the slider starts the drag pattern looping at a barely
//! perceptible amplitude. Moving it maps the position through the curve
//! and pushes the result to the player as a loop-parameter update, so the
//! vibration tightens like a drawn bowstring. Letting go snaps the slider
//! back to zero and fires the release pattern once.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::assets::AssetSource;
use crate::config::DemoConfig;
use crate::curves::SampledCurve;
use crate::haptics::{Effect, HapticPlayer, Playback, Repeat};
use crate::Result;

/// Input from the demo's UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The slider was pressed
    DragStarted,
    /// The slider moved to `progress`; `from_user` is false for programmatic moves
    DragMoved { progress: i32, from_user: bool },
    /// The slider was let go
    DragReleased,
    /// Replay the selected prebaked effect
    PlayPrebaked,
    /// Select and play the next prebaked effect
    NextPrebaked,
    /// Start the heartbeat loop
    PlayLoop,
    /// Stop whatever is playing
    StopLoop,
    /// The screen was closed; releases the player
    Close,
}

/// Controller for the bow-drag demo screen.
///
/// # Examples
///
/// ```no_run
/// use haptic_dynamics::{BowDemo, DemoConfig, UiEvent};
/// use haptic_dynamics::assets::DirAssets;
/// use haptic_dynamics::haptics::RecordingPlayer;
///
/// let assets = DirAssets::new("assets", "target/haptic-storage");
/// let mut demo = BowDemo::new(RecordingPlayer::new(1..=20), &assets, DemoConfig::default())?;
///
/// demo.handle(UiEvent::DragStarted)?;
/// demo.handle(UiEvent::DragMoved { progress: 95, from_user: true })?;
/// demo.handle(UiEvent::DragReleased)?;
/// # Ok::<(), haptic_dynamics::Error>(())
/// ```
pub struct BowDemo<P: HapticPlayer> {
    player: P,
    config: DemoConfig,
    curve: SampledCurve,
    bow_drag: String,
    bow_release: String,
    heartbeat_path: PathBuf,
    current_prebaked: u32,
    progress: i32,
    last_amplitude: Option<u8>,
    shut_down: bool,
}

impl<P: HapticPlayer> BowDemo<P> {
    /// Initializes the player, loads the descriptors and builds the curve.
    ///
    /// Fails on a missing asset or an out-of-range curve sample count. On
    /// error the player is shut down again before returning.
    pub fn new(mut player: P, assets: &impl AssetSource, config: DemoConfig) -> Result<Self> {
        player.initialize()?;
        info!(version = player.version(), supported = player.is_supported(), "haptic player ready");

        let prepared = load_assets(assets, &config)
            .and_then(|loaded| Ok((loaded, config.curve.build()?)));
        let ((bow_drag, bow_release, heartbeat_path), curve) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                player.shutdown();
                return Err(e);
            }
        };

        if !curve.bezier().is_x_monotonic() {
            warn!(bezier = ?curve.bezier(), "curve x is not monotonic, lookups may miss");
        }

        let current_prebaked = *player.prebaked_ids().start();

        Ok(Self {
            player,
            config,
            curve,
            bow_drag,
            bow_release,
            heartbeat_path,
            current_prebaked,
            progress: 0,
            last_amplitude: None,
            shut_down: false,
        })
    }

    /// Applies one UI event.
    pub fn handle(&mut self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::DragStarted => self.drag_started(),
            UiEvent::DragMoved {
                progress,
                from_user,
            } => self.drag_moved(progress, from_user),
            UiEvent::DragReleased => self.drag_released(),
            UiEvent::PlayPrebaked => self.play_prebaked(),
            UiEvent::NextPrebaked => {
                self.advance_prebaked();
                self.play_prebaked()
            }
            UiEvent::PlayLoop => {
                debug!(path = ?self.heartbeat_path, "playing heartbeat loop");
                let effect = Effect::File(self.heartbeat_path.clone());
                self.player.play(&effect, self.config.heartbeat)
            }
            UiEvent::StopLoop => self.player.stop(),
            UiEvent::Close => {
                self.shutdown_player();
                Ok(())
            }
        }
    }

    fn drag_started(&mut self) -> Result<()> {
        debug!("drag started");
        let drag = self.config.drag;
        let playback = Playback {
            repeat: Repeat::Forever,
            interval_ms: drag.loop_interval_ms,
            amplitude: drag.initial_amplitude,
            frequency: drag.frequency,
        };
        self.last_amplitude = None;
        self.player.play(&Effect::Pattern(self.bow_drag.clone()), playback)
    }

    fn drag_moved(&mut self, progress: i32, from_user: bool) -> Result<()> {
        debug!(progress, from_user, "slider moved");
        self.progress = progress;
        if !from_user {
            return Ok(());
        }

        let Some(amplitude) = self.amplitude_at(progress) else {
            debug!(progress, "no amplitude for slider position, skipping");
            return Ok(());
        };
        debug!(amplitude, "new amplitude");

        let drag = self.config.drag;
        self.player
            .update_loop_parameters(amplitude, drag.loop_interval_ms, drag.frequency)?;
        self.last_amplitude = Some(amplitude);
        Ok(())
    }

    fn drag_released(&mut self) -> Result<()> {
        debug!("drag released");
        self.progress = 0;
        self.last_amplitude = None;
        self.player
            .play(&Effect::Pattern(self.bow_release.clone()), self.config.release)
    }

    fn play_prebaked(&mut self) -> Result<()> {
        debug!(id = self.current_prebaked, "playing prebaked effect");
        self.player.play(
            &Effect::Prebaked(self.current_prebaked),
            Playback::once(self.config.prebaked_amplitude),
        )
    }

    fn advance_prebaked(&mut self) {
        let ids = self.player.prebaked_ids();
        self.current_prebaked = match self.current_prebaked.checked_add(1) {
            Some(next) if next <= *ids.end() => next,
            _ => *ids.start(),
        };
    }

    /// The amplitude the curve gives for a slider position.
    ///
    /// Positions the curve has no sample for, and curve values outside
    /// 1 to 255, give `None`. Zero is excluded because it would silence the
    /// loop rather than soften it.
    pub fn amplitude_at(&self, progress: i32) -> Option<u8> {
        let value = self.curve.lookup(progress)?;
        u8::try_from(value).ok().filter(|&a| a > 0)
    }

    /// Releases the player.
    pub fn shutdown(mut self) {
        self.shutdown_player();
    }

    fn shutdown_player(&mut self) {
        if !self.shut_down {
            info!("shutting down haptic player");
            self.player.shutdown();
            self.shut_down = true;
        }
    }

    /// Whether [`UiEvent::Close`] has released the player.
    pub fn is_closed(&self) -> bool {
        self.shut_down
    }

    /// Slider position as last reported, reset to 0 on release.
    pub fn progress(&self) -> i32 {
        self.progress
    }

    /// The last amplitude sent during the current drag.
    pub fn last_amplitude(&self) -> Option<u8> {
        self.last_amplitude
    }

    /// The selected prebaked effect id.
    pub fn current_prebaked(&self) -> u32 {
        self.current_prebaked
    }

    pub fn curve(&self) -> &SampledCurve {
        &self.curve
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn sdk_info(&self) -> String {
        format!("RichTap SDK: {}", self.player.version())
    }

    pub fn support_message(&self) -> &'static str {
        if self.player.is_supported() {
            "Congrats! Your device supports high-fidelity haptic feedback which is powered by RichTap."
        } else {
            "Sorry, but your device only supports low-fidelity haptic feedback..."
        }
    }

    pub fn prebaked_label(&self) -> String {
        format!("Prebaked Effect - ID: {}", self.current_prebaked)
    }

    pub fn drag_hint(&self) -> &'static str {
        "Drag & release to feel dynamic intensity change of the vibration"
    }

    pub fn about(&self) -> String {
        format!("Version: {}", env!("CARGO_PKG_VERSION"))
    }
}

impl<P: HapticPlayer> Drop for BowDemo<P> {
    fn drop(&mut self) {
        self.shutdown_player();
    }
}

fn load_assets(assets: &impl AssetSource, config: &DemoConfig) -> Result<(String, String, PathBuf)> {
    let bow_drag = assets.read_pattern(&config.assets.bow_drag)?;
    let bow_release = assets.read_pattern(&config.assets.bow_release)?;
    let heartbeat = assets.copy_to_private_storage(&config.assets.heartbeat)?;
    Ok((bow_drag, bow_release, heartbeat))
}
