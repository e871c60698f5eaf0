//! Interactive bow-drag demo.
//!
//! Vibrations are played as an audible buzz, so the amplitude changes can be
//! heard on any machine with speakers.
//!
//! Controls:
//! - SPACE: Hold to draw the bow, release to let go
//! - LEFT/RIGHT: Move the slider while SPACE is held
//! - P: Play the selected prebaked effect
//! - N: Select and play the next prebaked effect
//! - L: Start the heartbeat loop
//! - S: Stop
//! - Q/ESC: Close the demo and quit
//!
//! Logs go to `bow_drag_interactive.log` in the system temp directory.

mod common;

use anyhow::Result;
use common::buzz::BuzzPlayer;
use common::{DemoAudioState, KeyAction, init_file_tracing, is_quit_key, run_interactive_demo};
use crossterm::{
    ExecutableCommand,
    event::{KeyCode, KeyEvent, KeyEventKind},
};
use haptic_dynamics::assets::DirAssets;
use haptic_dynamics::{BowDemo, DemoConfig, UiEvent};
use std::io::{Write, stdout};
use tracing::warn;

const SAMPLE_RATE: u32 = 44100;
const SLIDER_STEP: i32 = 2;
const SLIDER_MAX: i32 = 100;

struct DemoState {
    demo: BowDemo<BuzzPlayer>,
    dragging: bool,
    status: String,
}

impl DemoState {
    fn handle_key_event(&mut self, code: KeyCode, kind: KeyEventKind) {
        let pressed = matches!(kind, KeyEventKind::Press | KeyEventKind::Repeat);
        let event = match code {
            KeyCode::Char(' ') if pressed && !self.dragging => {
                self.dragging = true;
                Some(UiEvent::DragStarted)
            }
            KeyCode::Char(' ') if kind == KeyEventKind::Release && self.dragging => {
                self.dragging = false;
                Some(UiEvent::DragReleased)
            }
            KeyCode::Right | KeyCode::Left if pressed && self.dragging => {
                let step = if code == KeyCode::Right { SLIDER_STEP } else { -SLIDER_STEP };
                let progress = (self.demo.progress() + step).clamp(0, SLIDER_MAX);
                Some(UiEvent::DragMoved {
                    progress,
                    from_user: true,
                })
            }
            KeyCode::Char('p') if kind == KeyEventKind::Press => Some(UiEvent::PlayPrebaked),
            KeyCode::Char('n') if kind == KeyEventKind::Press => Some(UiEvent::NextPrebaked),
            KeyCode::Char('l') if kind == KeyEventKind::Press => Some(UiEvent::PlayLoop),
            KeyCode::Char('s') if kind == KeyEventKind::Press => Some(UiEvent::StopLoop),
            _ => None,
        };

        if let Some(event) = event {
            self.status = match self.demo.handle(event) {
                Ok(()) => format!("{:?}", event),
                Err(e) => {
                    warn!(?event, error = %e, "event failed");
                    format!("{:?} failed: {}", event, e)
                }
            };
        }
    }
}

impl DemoAudioState for DemoState {
    fn next_sample(&mut self) -> f64 {
        self.demo.player_mut().next_sample()
    }
}

fn slider_bar(progress: i32) -> String {
    let filled = (progress / 2) as usize;
    let empty = (SLIDER_MAX / 2) as usize - filled;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(empty))
}

fn draw_ui(state: &DemoState) -> Result<()> {
    let demo = &state.demo;
    let mut stdout = stdout();
    stdout.execute(crossterm::terminal::Clear(
        crossterm::terminal::ClearType::All,
    ))?;
    stdout.execute(crossterm::cursor::MoveTo(0, 0))?;

    let amplitude = demo
        .player()
        .amplitude()
        .map_or_else(|| "-".to_string(), |a| a.to_string());
    let lines = [
        demo.sdk_info(),
        demo.support_message().to_string(),
        String::new(),
        demo.drag_hint().to_string(),
        format!("{} {:3}", slider_bar(demo.progress()), demo.progress()),
        format!("Amplitude: {}", amplitude),
        String::new(),
        demo.prebaked_label(),
        String::new(),
        format!("Last: {}", state.status),
        String::new(),
        "HOLD SPACE=draw  LEFT/RIGHT=move  P=prebaked  N=next  L=loop  S=stop  Q=quit".to_string(),
    ];
    for line in lines {
        // Raw mode needs an explicit carriage return
        write!(stdout, "{}\r\n", line)?;
    }
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    init_file_tracing(
        &std::env::temp_dir().join("bow_drag_interactive.log"),
        "debug",
    )?;

    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::from_path(path)?,
        None => DemoConfig::default(),
    };
    let assets = DirAssets::new(
        concat!(env!("CARGO_MANIFEST_DIR"), "/assets"),
        std::env::temp_dir().join("haptic-dynamics-storage"),
    );
    let demo = BowDemo::new(BuzzPlayer::new(SAMPLE_RATE, 1..=20), &assets, config)?;

    let state = DemoState {
        demo,
        dragging: false,
        status: "ready".to_string(),
    };

    run_interactive_demo(state, draw_ui, |state, key_event: &KeyEvent| {
        if is_quit_key(key_event.code) && key_event.kind == KeyEventKind::Press {
            state.demo.handle(UiEvent::Close)?;
            return Ok(KeyAction::Exit);
        }
        state.handle_key_event(key_event.code, key_event.kind);
        Ok(KeyAction::Continue)
    })?;

    println!("\nGoodbye!");
    Ok(())
}
