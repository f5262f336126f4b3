//! gui/update/util.rs
use iced::futures::channel::oneshot;
use tracing::warn;

use osulux::core::KeyValueStore;

use super::super::state::Osulux;

/// Run a blocking function on a background thread and await the result.
///
/// `None` means the worker died before answering.
pub(crate) async fn spawn_blocking<T>(f: impl FnOnce() -> T + Send + 'static) -> Option<T>
where
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel::<T>();

    std::thread::spawn(move || {
        let _ = tx.send(f());
    });

    rx.await.ok()
}

/// Write the current state to the settings store. Failures are logged, not fatal.
pub(crate) fn persist(state: &Osulux) {
    let snapshot = state
        .library
        .persisted_state(state.volume, state.position_ms);

    if let Err(e) = state.store.save_state(&snapshot) {
        warn!(path = %state.store.path().display(), error = %e, "saving settings failed");
    }
}

/// Recompute the track list from the active playlist and the search box.
pub(crate) fn refresh_visible(state: &mut Osulux) {
    let list = state.library.playlist(&state.active_playlist);
    state.visible = state.library.search(list, &state.search);
}
