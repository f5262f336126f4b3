//! gui/update/selection.rs
//!
//! Which playlist is open, what the search box says, which row is selected.
//! Selection is keyed by display name, so it survives re-filtering.

use iced::Task;
use iced::widget::image;

use super::super::state::{Message, Osulux};
use super::util::refresh_visible;

pub(crate) fn select_playlist(state: &mut Osulux, name: String) -> Task<Message> {
    state.active_playlist = name;
    refresh_visible(state);
    Task::none()
}

pub(crate) fn search_changed(state: &mut Osulux, query: String) -> Task<Message> {
    state.search = query;
    refresh_visible(state);
    Task::none()
}

pub(crate) fn select_track(state: &mut Osulux, name: String) -> Task<Message> {
    state.selected = Some(name);
    refresh_details(state);
    Task::none()
}

/// Cover + video for the selected track. `Handle::from_path` is lazy, so
/// this only touches the filesystem to check which files exist.
pub(crate) fn refresh_details(state: &mut Osulux) {
    let Some(name) = state.selected.as_deref() else {
        state.cover = None;
        state.video = None;
        return;
    };

    state.cover = state
        .library
        .resolve_cover(name)
        .map(image::Handle::from_path);
    state.video = state.library.resolve_video(name);
}
