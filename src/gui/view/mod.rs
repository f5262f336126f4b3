//! GUI renderer (reads state, produces widgets; no mutation).

mod constants;
mod details;
mod sidebar;
mod tracks;
mod widgets;

use iced::Length;
use iced::widget::{Column, column, row};

use super::state::{Message, Osulux};
use constants::{DETAILS_W, PLAYBACK_H, SIDEBAR_W};

pub(crate) fn view(state: &Osulux) -> Column<'_, Message> {
    let playback = widgets::playback_bar(state).height(Length::Fixed(PLAYBACK_H));

    let sidebar = sidebar::build_sidebar(state).width(Length::Fixed(SIDEBAR_W));
    let main = tracks::build_tracks_center(state).width(Length::Fill);
    let details = details::build_details_panel(state).width(Length::Fixed(DETAILS_W));

    let body = row![sidebar, main, details].spacing(12).height(Length::Fill);
    column![playback, body].spacing(12).padding(12)
}
