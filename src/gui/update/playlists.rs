//! gui/update/playlists.rs
//! Playlist + favorites commands. Each one persists on success.

use iced::Task;

use osulux::core::{PlaylistError, ReservedPlaylist};

use super::super::state::{Message, Osulux};
use super::util::{persist, refresh_visible};

pub(crate) fn playlist_input_changed(state: &mut Osulux, s: String) -> Task<Message> {
    state.playlist_input = s;
    Task::none()
}

pub(crate) fn create_playlist(state: &mut Osulux) -> Task<Message> {
    let name = state.playlist_input.trim().to_string();

    let result = state.library.create_playlist(&name);
    if finish(state, result, format!("Created playlist \"{name}\"")) {
        state.playlist_input.clear();
    }
    Task::none()
}

/// Rename the active playlist to whatever is in the name box.
pub(crate) fn rename_playlist(state: &mut Osulux) -> Task<Message> {
    let old = state.active_playlist.clone();
    let new = state.playlist_input.trim().to_string();

    let result = state.library.rename_playlist(&old, &new);
    if finish(state, result, format!("Renamed \"{old}\" to \"{new}\"")) {
        if state.add_target.as_deref() == Some(old.as_str()) {
            state.add_target = Some(new.clone());
        }
        state.active_playlist = new;
        state.playlist_input.clear();
        refresh_visible(state);
    }
    Task::none()
}

pub(crate) fn delete_playlist(state: &mut Osulux, name: String) -> Task<Message> {
    let result = state.library.delete_playlist(&name);
    if finish(state, result, format!("Deleted playlist \"{name}\"")) {
        if state.add_target.as_deref() == Some(name.as_str()) {
            state.add_target = None;
        }
        if state.active_playlist == name {
            state.active_playlist = ReservedPlaylist::All.name().to_string();
        }
        refresh_visible(state);
    }
    Task::none()
}

pub(crate) fn add_target_selected(state: &mut Osulux, name: String) -> Task<Message> {
    state.add_target = Some(name);
    Task::none()
}

pub(crate) fn add_selected(state: &mut Osulux) -> Task<Message> {
    let (Some(track), Some(target)) = (state.selected.clone(), state.add_target.clone()) else {
        state.status = "Select a track and a playlist first.".into();
        return Task::none();
    };

    match state.library.add_to_playlist(&target, &track) {
        Ok(true) => {
            state.status = format!("Added to \"{target}\"");
            refresh_visible(state);
            persist(state);
        }
        Ok(false) => state.status = format!("Already in \"{target}\""),
        Err(e) => state.status = e.to_string(),
    }
    Task::none()
}

/// Remove the selected track from the active (user) playlist.
pub(crate) fn remove_selected(state: &mut Osulux) -> Task<Message> {
    let Some(track) = state.selected.clone() else {
        return Task::none();
    };
    let playlist = state.active_playlist.clone();

    match state.library.remove_from_playlist(&playlist, &track) {
        Ok(_) => {
            state.status = format!("Removed from \"{playlist}\"");
            refresh_visible(state);
            persist(state);
        }
        Err(e) => state.status = e.to_string(),
    }
    Task::none()
}

pub(crate) fn toggle_favorite(state: &mut Osulux) -> Task<Message> {
    let Some(track) = state.selected.clone() else {
        return Task::none();
    };

    let now = state.library.toggle_favorite(&track);
    state.status = if now {
        format!("Added \"{track}\" to Favorites")
    } else {
        format!("Removed \"{track}\" from Favorites")
    };

    refresh_visible(state);
    persist(state);
    Task::none()
}

/// Report the outcome; persist on success. Returns whether it succeeded.
fn finish(state: &mut Osulux, result: Result<(), PlaylistError>, ok: String) -> bool {
    match result {
        Ok(()) => {
            state.status = ok;
            persist(state);
            true
        }
        Err(e) => {
            state.status = e.to_string();
            false
        }
    }
}
