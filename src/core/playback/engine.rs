//! core/playback/engine.rs
//! Playback engine (rodio owner).
//!
//! Owns:
//! - OutputStream (must stay alive)
//! - Sink (per current track)
//! - command loop + periodic position ticks
//!
//! Seeking reopens the file at the target offset instead of asking rodio to
//! seek the live source, so every container symphonia can probe is seekable.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, info, warn};

use super::decoder::open_source_at_ms;
use super::{PlayerCommand, PlayerEvent};
use crate::core::error::{Error, Result};

const TICK_MS: u64 = 200;

struct Current {
    path: PathBuf,
    sink: Sink,
    // Sink::get_pos restarts at 0 after a reopen.
    offset_ms: u64,
    length_ms: Option<u64>,
}

pub struct PlaybackEngine {
    // Keep this alive for the lifetime of the engine!
    stream: OutputStream,
    current: Option<Current>,
    volume: f32,
    event_tx: Sender<PlayerEvent>,
}

impl PlaybackEngine {
    pub fn new(event_tx: Sender<PlayerEvent>) -> Result<Self> {
        // rodio 0.21.x: build/open the default output stream via OutputStreamBuilder
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| Error::Playback(format!("failed to open audio output: {e}")))?;

        Ok(Self {
            stream,
            current: None,
            volume: 1.0,
            event_tx,
        })
    }

    pub fn run(&mut self, command_rx: Receiver<PlayerCommand>) {
        let tick = Duration::from_millis(TICK_MS);

        loop {
            match command_rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                    while let Ok(cmd) = command_rx.try_recv() {
                        if self.handle_command(cmd) {
                            self.stop_internal();
                            return;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            self.tick();
        }

        self.stop_internal();
        debug!("playback engine stopped");
    }

    /// Returns true on Shutdown.
    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        match cmd {
            PlayerCommand::Play { path, start_ms } => {
                if let Err(e) = self.play(path, start_ms) {
                    warn!(error = %e, "play failed");
                    self.emit(PlayerEvent::Error(e.to_string()));
                }
            }
            PlayerCommand::Pause => {
                if let Some(cur) = &self.current {
                    cur.sink.pause();
                    self.emit(PlayerEvent::Paused);
                }
            }
            PlayerCommand::Resume => {
                if let Some(cur) = &self.current {
                    cur.sink.play();
                    self.emit(PlayerEvent::Resumed);
                }
            }
            PlayerCommand::Stop => {
                self.stop_internal();
                self.emit(PlayerEvent::Stopped);
            }
            PlayerCommand::Seek(ms) => {
                if let Err(e) = self.seek(ms) {
                    warn!(error = %e, target_ms = ms, "seek failed");
                    self.emit(PlayerEvent::Error(e.to_string()));
                }
            }
            PlayerCommand::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(cur) = &self.current {
                    cur.sink.set_volume(self.volume);
                }
            }
            PlayerCommand::Shutdown => return true,
        }

        false
    }

    fn tick(&mut self) {
        let Some(cur) = &self.current else {
            return;
        };

        if cur.sink.empty() {
            debug!(path = %cur.path.display(), "track finished");
            self.stop_internal();
            self.emit(PlayerEvent::Finished);
            return;
        }

        let position_ms = cur.offset_ms + cur.sink.get_pos().as_millis() as u64;
        self.emit(PlayerEvent::Position(position_ms));
    }

    fn play(&mut self, path: PathBuf, start_ms: u64) -> Result<()> {
        self.stop_internal();
        self.start(&path, start_ms, false)?;

        info!(path = %path.display(), start_ms, "playback started");
        self.emit(PlayerEvent::Started { path, start_ms });
        if let Some(len) = self.current.as_ref().and_then(|c| c.length_ms) {
            self.emit(PlayerEvent::LengthKnown(len));
        }
        Ok(())
    }

    fn seek(&mut self, target_ms: u64) -> Result<()> {
        let Some(cur) = self.current.take() else {
            return Ok(());
        };

        let paused = cur.sink.is_paused();
        cur.sink.stop();

        let target_ms = match cur.length_ms {
            Some(len) => target_ms.min(len.saturating_sub(1)),
            None => target_ms,
        };

        self.start(&cur.path, target_ms, paused)?;
        self.emit(PlayerEvent::Position(target_ms));
        Ok(())
    }

    fn start(&mut self, path: &Path, start_ms: u64, paused: bool) -> Result<()> {
        let (source, length_ms) = open_source_at_ms(path, start_ms)?;

        // rodio 0.21.x: Sink is created from the stream's mixer
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        if paused {
            sink.pause();
        } else {
            sink.play();
        }

        self.current = Some(Current {
            path: path.to_path_buf(),
            sink,
            offset_ms: start_ms,
            length_ms,
        });
        Ok(())
    }

    fn stop_internal(&mut self) {
        if let Some(cur) = self.current.take() {
            cur.sink.stop();
        }
    }

    fn emit(&self, event: PlayerEvent) {
        // Receiver gone = GUI is shutting down.
        let _ = self.event_tx.send(event);
    }
}
