//! Track list for the active playlist.

use iced::widget::{Column, column, container, mouse_area, row, scrollable, text, text_input};
use iced::{Alignment, Length};

use super::super::state::{Message, Osulux};
use super::constants::{
    HEADER_TEXT, ROW_TEXT, TRACK_LIST_SPACING, TRACK_ROW_H, TRACK_ROW_HPAD, TRACK_ROW_VPAD,
};

pub(crate) fn build_tracks_center(state: &Osulux) -> Column<'_, Message> {
    let search = text_input("Search title, artist, tags, mapper", &state.search)
        .on_input(Message::SearchChanged)
        .width(Length::Fill);

    let heading = format!("{} ({})", state.active_playlist, state.visible.len());

    column![
        text(heading).size(18),
        search,
        build_tracks_table(state).height(Length::Fill),
    ]
    .spacing(12)
}

fn build_tracks_table(state: &Osulux) -> iced::widget::Scrollable<'_, Message> {
    let header = row![
        text("").size(HEADER_TEXT).width(Length::Fixed(24.0)),
        text("Track").size(HEADER_TEXT).width(Length::Fill),
        text("").size(HEADER_TEXT).width(Length::Fixed(24.0)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut col = column![header].spacing(TRACK_LIST_SPACING);

    for name in &state.visible {
        let is_playing = state.now_playing.as_ref() == Some(name);
        let is_selected = state.selected.as_ref() == Some(name);

        // Now playing gets ♪. Selected rows get ▶.
        let marker = if is_playing {
            "♪"
        } else if is_selected {
            "▶"
        } else {
            ""
        };
        let fav = if state.library.is_favorite(name) { "★" } else { "" };

        let row_cells = row![
            text(marker).size(ROW_TEXT).width(Length::Fixed(24.0)),
            text(name.as_str()).size(ROW_TEXT).width(Length::Fill),
            text(fav).size(ROW_TEXT).width(Length::Fixed(24.0)),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let row_widget = mouse_area(
            container(row_cells)
                .padding([TRACK_ROW_VPAD, TRACK_ROW_HPAD])
                .height(Length::Fixed(TRACK_ROW_H))
                .width(Length::Fill),
        )
        .on_press(Message::SelectTrack(name.clone()));

        col = col.push(row_widget);
    }

    scrollable(col).height(Length::Fill)
}
