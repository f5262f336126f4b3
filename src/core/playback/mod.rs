//! core/playback/mod.rs
//! Audio playback behind a command channel.
//!
//! The engine lives on its own thread and owns the rodio output. Callers hold a
//! [`PlaybackController`] to send [`PlayerCommand`]s and drain
//! [`PlayerEvent`]s from the returned receiver. Library state never lives here.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{error, warn};

mod decoder;
mod engine;

pub use decoder::{SymphoniaSource, open_source_at_ms};
pub use engine::PlaybackEngine;

#[derive(Debug, Clone)]
pub struct PlaybackController {
    command_tx: Sender<PlayerCommand>,
}

impl PlaybackController {
    /// Best-effort send. If the engine died, the command is dropped.
    pub fn send(&self, cmd: PlayerCommand) {
        if self.command_tx.send(cmd).is_err() {
            warn!("playback engine is gone; command dropped");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    /// Replace whatever is playing. `start_ms` > 0 resumes mid-track.
    Play { path: PathBuf, start_ms: u64 },
    Pause,
    Resume,
    Stop,
    Seek(u64),      // ms
    SetVolume(f32), // 0.0..=1.0
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Started { path: PathBuf, start_ms: u64 },
    /// Total length, once the decoder knows it.
    LengthKnown(u64),
    Position(u64),
    /// Natural end of the track (not sent for Stop or a replacing Play).
    Finished,
    Paused,
    Resumed,
    Stopped,
    Error(String),
}

/// Spawns the playback thread and returns:
/// - PlaybackController (store in GUI state)
/// - Receiver<PlayerEvent> (drained by a periodic tick)
pub fn start_playback() -> (PlaybackController, Receiver<PlayerEvent>) {
    let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();

    let spawned = thread::Builder::new()
        .name("osulux-playback".into())
        .spawn(move || {
            let mut engine = match PlaybackEngine::new(event_tx.clone()) {
                Ok(e) => e,
                Err(e) => {
                    error!(error = %e, "audio output unavailable");
                    let _ = event_tx.send(PlayerEvent::Error(e.to_string()));
                    return;
                }
            };

            engine.run(command_rx);
        });

    if let Err(e) = spawned {
        error!(error = %e, "failed to spawn playback thread");
    }

    (PlaybackController { command_tx }, event_rx)
}
