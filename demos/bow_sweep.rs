//! Headless walk through the demo.
//!
//! Drags the slider from 0 to 100, lets go, cycles through a few prebaked
//! effects and runs the heartbeat loop, all against a recording player.
//! Then prints the amplitude table and every command the player received.
//!
//! Pass a JSON config file as the first argument to try a different curve.
//! Set `RUST_LOG=debug` to see each event as it is handled.

use anyhow::Result;
use haptic_dynamics::assets::DirAssets;
use haptic_dynamics::haptics::RecordingPlayer;
use haptic_dynamics::{BowDemo, DemoConfig, UiEvent};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let fmt_layer = fmt::layer().with_target(false);
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading config from {path}");
            DemoConfig::from_path(path)?
        }
        None => DemoConfig::default(),
    };

    let storage = std::env::temp_dir().join("haptic-dynamics-storage");
    let assets = DirAssets::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"), storage);
    let mut demo = BowDemo::new(RecordingPlayer::new(1..=20), &assets, config)?;

    println!("{}", demo.sdk_info());
    println!("{}", demo.support_message());
    println!("{}", demo.about());
    println!();

    println!("{}", demo.drag_hint());
    println!("{:>8}  {:>9}", "progress", "amplitude");
    demo.handle(UiEvent::DragStarted)?;
    for progress in 0..=100 {
        demo.handle(UiEvent::DragMoved {
            progress,
            from_user: true,
        })?;
        if progress % 5 == 0 {
            let amplitude = demo
                .amplitude_at(progress)
                .map_or_else(|| "-".to_string(), |a| a.to_string());
            println!("{:>8}  {:>9}", progress, amplitude);
        }
    }
    demo.handle(UiEvent::DragReleased)?;
    println!();

    demo.handle(UiEvent::PlayPrebaked)?;
    println!("{}", demo.prebaked_label());
    for _ in 0..3 {
        demo.handle(UiEvent::NextPrebaked)?;
        println!("{}", demo.prebaked_label());
    }
    println!();

    demo.handle(UiEvent::PlayLoop)?;
    demo.handle(UiEvent::StopLoop)?;

    let commands = demo.player_mut().take_commands();
    println!("Player received {} commands:", commands.len());
    for command in &commands {
        println!("  {:?}", command);
    }

    demo.shutdown();
    Ok(())
}
