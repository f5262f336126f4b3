//! Reusable small widgets/helpers used across view modules.

use iced::widget::{button, column, container, image, row, slider, text};
use iced::{Alignment, Element, Length};

use super::super::state::{Message, Osulux};

/// `m:ss`
pub(crate) fn fmt_duration(ms: u64) -> String {
    let s = ms / 1000;
    let m = s / 60;
    let s = s % 60;
    format!("{m}:{s:02}")
}

pub(crate) fn cover_placeholder(size: f32) -> iced::widget::Container<'static, Message> {
    container(
        column![text("♪").size(28), text("no background").size(12)]
            .spacing(4)
            .align_x(Alignment::Center),
    )
    .width(Length::Fixed(size))
    .height(Length::Fixed(size))
    .center_x(Length::Fixed(size))
    .center_y(Length::Fixed(size))
}

/// If `handle` exists, show it; otherwise show the placeholder.
/// Returns an Element so callers can embed it in `column![]` easily.
pub(crate) fn cover_thumb(
    handle: Option<&image::Handle>,
    size: f32,
) -> Element<'static, Message> {
    match handle {
        Some(h) => container(image(h.clone()))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .center_x(Length::Fixed(size))
            .center_y(Length::Fixed(size))
            .into(),
        None => cover_placeholder(size).into(),
    }
}

/// Top playback bar.
///
/// Emits only Messages (no rodio, no decoding).
pub(crate) fn playback_bar(state: &Osulux) -> iced::widget::Container<'_, Message> {
    let play_label = if state.is_playing { "Pause" } else { "Play" };

    let prev_btn = if state.library.has_previous() {
        button("⏮").on_press(Message::Prev)
    } else {
        button("⏮")
    };
    let play_btn = button(play_label).on_press(Message::TogglePlayPause);
    let stop_btn = button("■").on_press(Message::Stop);
    let next_btn = button("⏭").on_press(Message::Next);
    let shuffle_btn = button(if state.library.shuffle() {
        "Shuffle: on"
    } else {
        "Shuffle: off"
    })
    .on_press(Message::ToggleShuffle);

    // --- seek slider ---
    let pos = state.position_ms;
    let dur = state.duration_ms.unwrap_or(0);
    let seek_enabled = dur > 0;

    // slider needs a sane range; if we don't know duration yet, freeze it at 0..=1
    let (seek_max, seek_val) = if seek_enabled {
        (dur as f32, pos.min(dur) as f32)
    } else {
        (1.0f32, 0.0f32)
    };

    let seek = slider(0.0..=seek_max, seek_val, Message::SeekTo)
        .on_release(Message::SeekCommit)
        .width(Length::Fill);

    let time_text = if seek_enabled {
        format!("{} / {}", fmt_duration(pos), fmt_duration(dur))
    } else {
        format!("{} / -:--", fmt_duration(pos))
    };

    // --- volume slider ---
    let vol = state.volume.clamp(0.0, 1.0);
    let vol_slider = slider(0.0..=1.0, vol, Message::SetVolume)
        .step(0.01)
        .width(Length::Fixed(140.0));

    let now_playing = state.now_playing.as_deref().unwrap_or("Nothing playing");

    let bar = row![
        // left: transport
        row![prev_btn, play_btn, stop_btn, next_btn, shuffle_btn]
            .spacing(8)
            .align_y(Alignment::Center),
        // middle: now playing + seek
        column![
            text(now_playing).size(14),
            row![seek, text(time_text).size(12)]
                .spacing(10)
                .align_y(Alignment::Center),
        ]
        .spacing(6)
        .width(Length::Fill),
        // right: volume
        row![text("Vol").size(12), vol_slider]
            .spacing(8)
            .align_y(Alignment::Center),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    container(bar).padding(12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_format_as_minutes_and_seconds() {
        assert_eq!(fmt_duration(0), "0:00");
        assert_eq!(fmt_duration(61_500), "1:01");
        assert_eq!(fmt_duration(600_000), "10:00");
    }
}
