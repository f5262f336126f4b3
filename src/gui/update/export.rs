//! gui/update/export.rs
//! Copy the selected track (or the whole visible list) to a folder, off-thread.

use std::path::PathBuf;

use iced::Task;

use osulux::core::export::{ExportSummary, export_playlist};

use super::super::state::{Message, Osulux};
use super::util::spawn_blocking;

pub(crate) fn export_input_changed(state: &mut Osulux, s: String) -> Task<Message> {
    state.export_input = s;
    Task::none()
}

pub(crate) fn export_selected(state: &mut Osulux) -> Task<Message> {
    let Some(name) = state.selected.clone() else {
        state.status = "No track selected.".into();
        return Task::none();
    };
    start_export(state, vec![name])
}

pub(crate) fn export_visible(state: &mut Osulux) -> Task<Message> {
    let names = state.visible.clone();
    start_export(state, names)
}

fn start_export(state: &mut Osulux, names: Vec<String>) -> Task<Message> {
    if state.exporting {
        return Task::none();
    }

    let dest = state.export_input.trim();
    if dest.is_empty() {
        state.status = "Enter an export folder.".into();
        return Task::none();
    }
    let dest = PathBuf::from(dest);

    state.exporting = true;
    state.status = format!("Exporting {} track(s)...", names.len());

    let catalog = state.library.catalog();
    Task::perform(
        spawn_blocking(move || export_playlist(&catalog, &names, &dest)),
        Message::ExportFinished,
    )
}

pub(crate) fn export_finished(state: &mut Osulux, summary: Option<ExportSummary>) -> Task<Message> {
    state.exporting = false;

    state.status = match summary {
        Some(s) if s.failed.is_empty() => format!("Exported {} track(s)", s.exported.len()),
        Some(s) => format!(
            "Exported {} track(s), {} failed",
            s.exported.len(),
            s.failed.len()
        ),
        None => "Export failed.".into(),
    };

    Task::none()
}
