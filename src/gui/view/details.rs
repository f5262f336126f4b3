//! Right panel: cover, track info, actions for the selected track.

use iced::Length;
use iced::widget::{Column, button, column, container, pick_list, row, text, text_input};

use super::super::state::{Message, Osulux};
use super::constants::COVER_BIG;
use super::widgets::cover_thumb;

pub(crate) fn build_details_panel(state: &Osulux) -> iced::widget::Container<'_, Message> {
    let Some(name) = state.selected.as_deref() else {
        return container(
            column![text("Nothing selected"), text("Pick a track from the list.").size(12)]
                .spacing(8),
        )
        .padding(12);
    };

    let mut col: Column<'_, Message> = column![
        cover_thumb(state.cover.as_ref(), COVER_BIG),
        text(name).size(16),
    ]
    .spacing(10);

    if let Some(track) = state.library.catalog().get(name) {
        if !track.creators.is_empty() {
            col = col.push(text(format!("Mapped by {}", track.creators.join(", "))).size(12));
        }
        if !track.tags.is_empty() {
            col = col.push(text(format!("Tags: {}", track.tags.join(" "))).size(12));
        }
    }
    if let Some(video) = &state.video {
        let file = video
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        col = col.push(text(format!("Video: {file}")).size(12));
    }

    let fav_label = if state.library.is_favorite(name) {
        "★ Unfavorite"
    } else {
        "☆ Favorite"
    };

    col = col.push(
        row![
            button("Play").on_press(Message::PlaySelected),
            button(fav_label).on_press(Message::ToggleFavorite),
        ]
        .spacing(8),
    );

    // Add to a user playlist.
    let targets = state.user_playlist_names();
    let picker = pick_list(targets, state.add_target.clone(), Message::AddTargetSelected)
        .placeholder("Add to playlist...")
        .width(Length::Fill);
    col = col.push(
        row![picker, button("Add").on_press(Message::AddSelectedToPlaylist)].spacing(8),
    );

    if !state.library.is_reserved(&state.active_playlist) {
        col = col.push(
            button(text(format!("Remove from \"{}\"", state.active_playlist)))
                .on_press(Message::RemoveSelectedFromPlaylist),
        );
    }

    // Export
    let export_input = text_input("Export folder", &state.export_input)
        .on_input(Message::ExportInputChanged)
        .width(Length::Fill);
    let (export_one, export_all) = if state.exporting {
        (button("Export track"), button("Export list"))
    } else {
        (
            button("Export track").on_press(Message::ExportSelected),
            button("Export list").on_press(Message::ExportPlaylist),
        )
    };
    col = col.push(export_input);
    col = col.push(row![export_one, export_all].spacing(8));

    container(col).padding(12)
}
