//! gui/update/scan.rs
//! Scan lifecycle + async boundary.
//!
//! The scan runs off the UI thread; the finished `ScanReport` comes back as
//! `Message::ScanFinished` and is installed into the `Library` here, so the
//! library only ever has one writer.

use std::path::PathBuf;

use iced::Task;
use tracing::{debug, warn};

use osulux::core::{ReservedPlaylist, ScanReport, SkipReason, scan_library as core_scan_library};

use super::super::state::{Message, Osulux};
use super::selection::refresh_details;
use super::util::{persist, refresh_visible, spawn_blocking};

pub(crate) fn folder_input_changed(state: &mut Osulux, s: String) -> Task<Message> {
    state.folder_input = s;
    Task::none()
}

pub(crate) fn scan_library(state: &mut Osulux) -> Task<Message> {
    let input = state.folder_input.trim();
    if input.is_empty() {
        state.status = "Enter the path of your Songs folder.".into();
        return Task::none();
    }

    let root = PathBuf::from(input);
    if !root.is_dir() {
        state.status = format!("Not a folder: {}", root.display());
        return Task::none();
    }

    start_scan(state, root)
}

pub(crate) fn start_scan(state: &mut Osulux, root: PathBuf) -> Task<Message> {
    if state.scanning {
        return Task::none();
    }

    state.scanning = true;
    state.status = format!("Scanning {}...", root.display());

    Task::perform(
        spawn_blocking(move || core_scan_library(&root)),
        Message::ScanFinished,
    )
}

pub(crate) fn scan_finished(state: &mut Osulux, report: Option<ScanReport>) -> Task<Message> {
    state.scanning = false;

    let Some(report) = report else {
        warn!("scan worker exited without a result");
        state.status = "Scan failed.".into();
        return Task::none();
    };

    if report
        .skipped
        .iter()
        .any(|s| s.reason == SkipReason::RootUnavailable)
    {
        state.status = format!("Could not read {}", report.root.display());
        return Task::none();
    }

    for s in &report.skipped {
        debug!(path = %s.path.display(), reason = ?s.reason, "package skipped");
    }

    let skipped = report.skipped.len();
    let catalog = state.library.install(report);

    state.status = if skipped == 0 {
        format!("Loaded {} tracks", catalog.len())
    } else {
        format!("Loaded {} tracks ({skipped} skipped)", catalog.len())
    };

    // The old selection may have vanished with the rescan.
    if state
        .selected
        .as_deref()
        .is_some_and(|name| !catalog.contains(name))
    {
        state.selected = None;
    }
    if !state.library.playlists().contains(&state.active_playlist) {
        state.active_playlist = ReservedPlaylist::All.name().to_string();
    }

    refresh_visible(state);
    refresh_details(state);
    persist(state);
    Task::none()
}
