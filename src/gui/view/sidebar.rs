//! Left sidebar (library folder, playlists).

use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Length};

use super::super::state::{Message, Osulux};

pub(crate) fn build_sidebar(state: &Osulux) -> iced::widget::Container<'_, Message> {
    let folder_input = text_input("osu! Songs folder", &state.folder_input)
        .on_input(Message::FolderInputChanged)
        .on_submit(Message::ScanLibrary)
        .width(Length::Fill);

    let scan_btn = if state.scanning {
        button("Scanning...")
    } else {
        button("Scan").on_press(Message::ScanLibrary)
    };

    let mut playlists = column![].spacing(4);
    for name in state.library.playlist_names() {
        let count = state.library.playlist(&name).len();
        let active = name == state.active_playlist;
        let label = if active {
            format!("▶ {name} ({count})")
        } else {
            format!("{name} ({count})")
        };

        let select = button(text(label).size(14))
            .on_press(Message::SelectPlaylist(name.clone()))
            .width(Length::Fill);

        // Built-ins can't be deleted, so they get no × button.
        let entry = if state.library.is_reserved(&name) {
            row![select]
        } else {
            row![select, button("×").on_press(Message::DeletePlaylist(name))]
        };
        playlists = playlists.push(entry.spacing(6).align_y(Alignment::Center));
    }

    let name_input = text_input("Playlist name", &state.playlist_input)
        .on_input(Message::PlaylistInputChanged)
        .on_submit(Message::CreatePlaylist)
        .width(Length::Fill);

    let rename_btn = if state.library.is_reserved(&state.active_playlist) {
        button("Rename")
    } else {
        button("Rename").on_press(Message::RenamePlaylist)
    };

    let playlist_actions = row![
        button("New").on_press(Message::CreatePlaylist),
        rename_btn,
    ]
    .spacing(8);

    let col = column![
        text("osulux").size(20),
        text(&state.status).size(12),
        text("Library folder").size(16),
        folder_input,
        scan_btn,
        text("Playlists").size(16),
        scrollable(playlists).height(Length::Fill),
        name_input,
        playlist_actions,
    ]
    .spacing(12);

    container(col).padding(12).height(Length::Fill)
}
