//! GUI state + messages.
//! Pure data definitions used by update/ and view/.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use iced::Task;
use iced::widget::image;
use tracing::warn;

use osulux::core::export::ExportSummary;
use osulux::core::playback::{PlaybackController, PlayerEvent};
use osulux::core::{JsonFileStore, KeyValueStore, Library, PersistedState, ReservedPlaylist, ScanReport};

use super::update;

/// App state
pub(crate) struct Osulux {
    pub status: String,
    pub scanning: bool,

    // Library
    pub folder_input: String,
    pub library: Library,
    pub store: JsonFileStore,

    // Browsing
    pub active_playlist: String,
    pub search: String,
    /// Active playlist filtered by `search`; what the track list shows.
    pub visible: Vec<String>,
    pub selected: Option<String>,
    pub cover: Option<image::Handle>,
    pub video: Option<PathBuf>,

    // Playlist editing
    pub playlist_input: String,
    pub add_target: Option<String>,

    pub export_input: String,
    pub exporting: bool,

    // Playback
    pub playback: Option<PlaybackController>,
    pub playback_events: Option<Receiver<PlayerEvent>>,
    pub now_playing: Option<String>,
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: Option<u64>,
    pub seek_preview_ms: Option<u64>,
    pub volume: f32,
    /// Track + offset restored from settings; consumed by the first play of that track.
    pub resume_at: Option<(String, u64)>,
}

impl Osulux {
    fn new(store: JsonFileStore) -> Self {
        Self {
            status: "Pick your osu! Songs folder, then Scan.".to_string(),
            scanning: false,

            folder_input: String::new(),
            library: Library::new(),
            store,

            active_playlist: ReservedPlaylist::All.name().to_string(),
            search: String::new(),
            visible: Vec::new(),
            selected: None,
            cover: None,
            video: None,

            playlist_input: String::new(),
            add_target: None,

            export_input: String::new(),
            exporting: false,

            playback: None,
            playback_events: None,
            now_playing: None,
            is_playing: false,
            position_ms: 0,
            duration_ms: None,
            seek_preview_ms: None,
            volume: osulux::core::settings::DEFAULT_VOLUME,
            resume_at: None,
        }
    }

    /// User playlists, for the "add to" picker.
    pub fn user_playlist_names(&self) -> Vec<String> {
        self.library
            .playlists()
            .user_playlists()
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }
}

/// Restore settings, then kick off a scan of the last folder (if any).
pub(crate) fn boot() -> (Osulux, Task<Message>) {
    let store = JsonFileStore::default_location();
    let persisted = match store.load_state() {
        Ok(s) => s,
        Err(e) => {
            warn!(path = %store.path().display(), error = %e, "settings unreadable; starting fresh");
            PersistedState::default()
        }
    };

    let mut state = Osulux::new(store);
    state.library.restore(&persisted);
    state.volume = persisted.volume;
    state.selected = persisted.last_track.clone();
    state.resume_at = persisted
        .last_track
        .map(|t| (t, persisted.last_position_ms));

    let task = match persisted.last_folder {
        Some(folder) => {
            state.folder_input = folder.display().to_string();
            update::scan::start_scan(&mut state, folder)
        }
        None => Task::none(),
    };

    (state, task)
}

/// Message = "something happened".
#[derive(Debug, Clone)]
pub(crate) enum Message {
    TickPlayback,

    // Library folder
    FolderInputChanged(String),
    ScanLibrary,
    ScanFinished(Option<ScanReport>),

    // Browsing
    SelectPlaylist(String),
    SearchChanged(String),
    SelectTrack(String),

    // Playlists
    PlaylistInputChanged(String),
    CreatePlaylist,
    RenamePlaylist,
    DeletePlaylist(String),
    AddTargetSelected(String),
    AddSelectedToPlaylist,
    RemoveSelectedFromPlaylist,
    ToggleFavorite,

    // Playback
    PlaySelected,
    TogglePlayPause,
    Stop,
    Next,
    Prev,
    ToggleShuffle,
    SeekTo(f32),
    SeekCommit,
    SetVolume(f32),

    // Export
    ExportInputChanged(String),
    ExportSelected,
    ExportPlaylist,
    ExportFinished(Option<ExportSummary>),
}
