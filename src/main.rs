//! osulux
//!
//! A desktop player for an osu! `Songs` folder, built with `iced`.
//!
//! # How it fits together
//! - `osulux::core` does all the work: indexing package folders, playlists,
//!   favorites, history, search, settings, playback.
//! - `gui` is the Elm-style loop on top:
//!   **Message happens -> update changes state -> view redraws**
//!
//! # Concurrency
//! - Scans and exports run on background threads and come back as messages.
//! - Playback runs on its own thread; a 200ms tick drains its events.
//!
//! # Logging
//! `RUST_LOG` controls output (default `osulux=info`).

mod gui;

use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("osulux=info")),
        )
        .init();

    iced::application(gui::boot, gui::update, gui::view)
        .title(title)
        .subscription(gui::subscription)
        .run()
}

fn title(state: &gui::Osulux) -> String {
    match &state.now_playing {
        Some(name) => format!("{name} - osulux"),
        None => "osulux".to_string(),
    }
}
