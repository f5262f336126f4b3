//! gui/update/playback.rs
//! GUI <-> playback engine bridge.
//!
//! - GUI never touches rodio/symphonia directly.
//! - Which track plays next is the `Library`'s call (history + next_track);
//!   this module only turns names into paths and commands.
//! - All timing is driven by the engine + TickPlayback polling.

use iced::Task;
use tracing::{debug, warn};

use osulux::core::playback::{PlayerCommand, PlayerEvent, start_playback};

use super::super::state::{Message, Osulux};
use super::selection::refresh_details;
use super::util::{persist, refresh_visible};

fn ensure_engine(state: &mut Osulux) {
    if state.playback.is_some() && state.playback_events.is_some() {
        return;
    }

    let (controller, events) = start_playback();
    controller.send(PlayerCommand::SetVolume(state.volume));

    state.playback = Some(controller);
    state.playback_events = Some(events);
}

pub(crate) fn drain_events(state: &mut Osulux) -> Task<Message> {
    let Some(rx) = state.playback_events.as_ref() else {
        return Task::none();
    };

    let drained: Vec<PlayerEvent> = rx.try_iter().collect();

    let mut tasks = Vec::with_capacity(drained.len());
    for ev in drained {
        tasks.push(handle_event(state, ev));
    }
    Task::batch(tasks)
}

/// "Play" on the selected row: counts as a new pick from the active playlist.
pub(crate) fn play_selected(state: &mut Osulux) -> Task<Message> {
    let Some(name) = state.selected.clone() else {
        state.status = "No track selected.".into();
        return Task::none();
    };

    state.library.choose(&name, &state.active_playlist);
    start_track(state, name)
}

/// Send the audio for `name` to the engine. History was already updated by the caller.
fn start_track(state: &mut Osulux, name: String) -> Task<Message> {
    let Some(path) = state.library.resolve_audio_path(&name) else {
        state.status = format!("\"{name}\" is no longer in the library (rescan?)");
        return Task::none();
    };

    ensure_engine(state);
    let Some(controller) = &state.playback else {
        state.status = "Playback engine failed to initialize.".into();
        return Task::none();
    };

    let start_ms = match state.resume_at.take() {
        Some((track, ms)) if track == name => ms,
        _ => 0,
    };

    debug!(track = %name, path = %path.display(), start_ms, "play");
    controller.send(PlayerCommand::Play { path, start_ms });

    state.now_playing = Some(name.clone());
    state.selected = Some(name);
    state.is_playing = true;
    state.position_ms = start_ms;
    state.duration_ms = None;
    state.seek_preview_ms = None;

    refresh_details(state);
    refresh_visible(state);
    persist(state);
    Task::none()
}

pub(crate) fn toggle_play_pause(state: &mut Osulux) -> Task<Message> {
    if state.is_playing {
        return pause(state);
    }

    if state.now_playing.is_some() {
        resume(state)
    } else {
        play_selected(state)
    }
}

fn pause(state: &mut Osulux) -> Task<Message> {
    let Some(controller) = &state.playback else {
        return Task::none();
    };

    controller.send(PlayerCommand::Pause);
    state.is_playing = false;
    persist(state);

    Task::none()
}

fn resume(state: &mut Osulux) -> Task<Message> {
    let Some(controller) = &state.playback else {
        return play_selected(state);
    };

    controller.send(PlayerCommand::Resume);
    state.is_playing = true;

    Task::none()
}

pub(crate) fn stop(state: &mut Osulux) -> Task<Message> {
    if let Some(controller) = &state.playback {
        controller.send(PlayerCommand::Stop);
    }

    state.now_playing = None;
    state.is_playing = false;
    state.position_ms = 0;
    state.duration_ms = None;
    state.seek_preview_ms = None;
    persist(state);

    Task::none()
}

/// Redo tail first, otherwise the next entry of the visible list.
pub(crate) fn next(state: &mut Osulux) -> Task<Message> {
    match state.library.advance(&state.visible) {
        Some(name) => start_track(state, name),
        None => {
            state.status = "Nothing to play.".into();
            Task::none()
        }
    }
}

pub(crate) fn prev(state: &mut Osulux) -> Task<Message> {
    match state.library.step_back() {
        Some(name) => start_track(state, name),
        None => {
            state.status = "Start of history.".into();
            Task::none()
        }
    }
}

pub(crate) fn toggle_shuffle(state: &mut Osulux) -> Task<Message> {
    let on = !state.library.shuffle();
    state.library.set_shuffle(on);
    state.status = if on { "Shuffle on" } else { "Shuffle off" }.into();
    persist(state);

    Task::none()
}

/// Seek slider moved: preview only (UI updates, no engine command).
pub(crate) fn seek_preview(state: &mut Osulux, ms: f32) -> Task<Message> {
    let Some(dur_ms) = state.duration_ms else {
        return Task::none();
    };

    let target = (ms.max(0.0) as u64).min(dur_ms);
    state.seek_preview_ms = Some(target);
    state.position_ms = target;

    Task::none()
}

/// Seek slider released: commit the last preview to the engine.
pub(crate) fn seek_commit(state: &mut Osulux) -> Task<Message> {
    let Some(target_ms) = state.seek_preview_ms.take() else {
        return Task::none();
    };

    let Some(controller) = &state.playback else {
        return Task::none();
    };

    controller.send(PlayerCommand::Seek(target_ms));

    // Optimistic UI update; engine confirms via Position.
    state.position_ms = target_ms;

    Task::none()
}

pub(crate) fn set_volume(state: &mut Osulux, volume: f32) -> Task<Message> {
    let volume = volume.clamp(0.0, 1.0);
    state.volume = volume;

    if let Some(controller) = &state.playback {
        controller.send(PlayerCommand::SetVolume(volume));
    }
    persist(state);

    Task::none()
}

pub(crate) fn handle_event(state: &mut Osulux, event: PlayerEvent) -> Task<Message> {
    match event {
        PlayerEvent::Started { start_ms, .. } => {
            state.is_playing = true;
            state.position_ms = start_ms;
            state.seek_preview_ms = None;
            if let Some(name) = &state.now_playing {
                state.status = format!("Now playing: {name}");
            }
        }
        PlayerEvent::LengthKnown(ms) => state.duration_ms = Some(ms),
        PlayerEvent::Position(ms) => {
            // If user is dragging the seek slider, don't fight them.
            if state.seek_preview_ms.is_none() {
                state.position_ms = ms;
            }
        }
        PlayerEvent::Paused => state.is_playing = false,
        PlayerEvent::Resumed => state.is_playing = true,
        PlayerEvent::Stopped => {
            state.is_playing = false;
            state.position_ms = 0;
            state.duration_ms = None;
            state.seek_preview_ms = None;
        }
        PlayerEvent::Finished => {
            state.is_playing = false;
            state.position_ms = 0;
            return next(state);
        }
        PlayerEvent::Error(err) => {
            warn!(error = %err, "playback error");
            state.is_playing = false;
            state.status = format!("Playback error: {err}");
        }
    }

    Task::none()
}
