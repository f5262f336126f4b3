//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::state::{Message, Osulux};

mod export;
mod playback;
mod playlists;
pub(crate) mod scan;
mod selection;
mod util;

pub(crate) fn update(state: &mut Osulux, message: Message) -> Task<Message> {
    match message {
        Message::TickPlayback => playback::drain_events(state),

        // Library folder
        Message::FolderInputChanged(s) => scan::folder_input_changed(state, s),
        Message::ScanLibrary => scan::scan_library(state),
        Message::ScanFinished(report) => scan::scan_finished(state, report),

        // Browsing
        Message::SelectPlaylist(name) => selection::select_playlist(state, name),
        Message::SearchChanged(q) => selection::search_changed(state, q),
        Message::SelectTrack(name) => selection::select_track(state, name),

        // Playlists
        Message::PlaylistInputChanged(s) => playlists::playlist_input_changed(state, s),
        Message::CreatePlaylist => playlists::create_playlist(state),
        Message::RenamePlaylist => playlists::rename_playlist(state),
        Message::DeletePlaylist(name) => playlists::delete_playlist(state, name),
        Message::AddTargetSelected(name) => playlists::add_target_selected(state, name),
        Message::AddSelectedToPlaylist => playlists::add_selected(state),
        Message::RemoveSelectedFromPlaylist => playlists::remove_selected(state),
        Message::ToggleFavorite => playlists::toggle_favorite(state),

        // Playback
        Message::PlaySelected => playback::play_selected(state),
        Message::TogglePlayPause => playback::toggle_play_pause(state),
        Message::Stop => playback::stop(state),
        Message::Next => playback::next(state),
        Message::Prev => playback::prev(state),
        Message::ToggleShuffle => playback::toggle_shuffle(state),

        // Seek: preview vs commit
        Message::SeekTo(ms) => playback::seek_preview(state, ms),
        Message::SeekCommit => playback::seek_commit(state),

        Message::SetVolume(vol) => playback::set_volume(state, vol),

        // Export
        Message::ExportInputChanged(s) => export::export_input_changed(state, s),
        Message::ExportSelected => export::export_selected(state),
        Message::ExportPlaylist => export::export_visible(state),
        Message::ExportFinished(summary) => export::export_finished(state, summary),
    }
}
