//! core/settings.rs
//!
//! What survives a restart, and where it's stored.
//!
//! The engine only deals in [`PersistedState`]. Storage is a flat
//! string -> string map behind [`KeyValueStore`]:
//!
//! | key              | value                                   |
//! |------------------|-----------------------------------------|
//! | `lastFolder`     | root folder path                        |
//! | `volume`         | `0.0..=1.0`                             |
//! | `lastSong`       | display name                            |
//! | `lastPosition`   | milliseconds                            |
//! | `favorites`      | joined list                             |
//! | `history`        | joined list, oldest first               |
//! | `historyIndex`   | cursor                                  |
//! | `shuffle`        | `true` / `false`                        |
//! | `playlists`      | user playlist names, in sidebar order   |
//! | `playlist.<name>`| joined list, one key per user playlist  |
//!
//! Lists are joined with [`LIST_DELIMITER`]. Missing or garbled values fall
//! back to defaults. Last write wins; nothing here is transactional.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::error::{Error, Result};
use super::playlists::Playlist;

/// ASCII unit separator. Display names never contain it.
pub const LIST_DELIMITER: char = '\u{1f}';

pub const DEFAULT_VOLUME: f32 = 0.5;

/// Env var that overrides the settings file location.
pub const CONFIG_ENV: &str = "OSULUX_CONFIG";

const PLAYLIST_PREFIX: &str = "playlist.";
const PLAYLIST_ORDER_KEY: &str = "playlists";

#[derive(Debug, Clone, PartialEq)]
pub struct PersistedState {
    pub last_folder: Option<PathBuf>,
    pub volume: f32,
    pub last_track: Option<String>,
    pub last_position_ms: u64,
    pub favorites: Vec<String>,
    pub playlists: Vec<Playlist>,
    pub history: Vec<String>,
    pub history_cursor: Option<usize>,
    pub shuffle: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            last_folder: None,
            volume: DEFAULT_VOLUME,
            last_track: None,
            last_position_ms: 0,
            favorites: Vec::new(),
            playlists: Vec::new(),
            history: Vec::new(),
            history_cursor: None,
            shuffle: false,
        }
    }
}

impl PersistedState {
    pub fn to_entries(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();

        if let Some(folder) = &self.last_folder {
            out.insert("lastFolder".into(), folder.display().to_string());
        }
        out.insert("volume".into(), self.volume.clamp(0.0, 1.0).to_string());
        if let Some(track) = &self.last_track {
            out.insert("lastSong".into(), track.clone());
        }
        out.insert("lastPosition".into(), self.last_position_ms.to_string());
        out.insert("favorites".into(), join_list(&self.favorites));
        out.insert("history".into(), join_list(&self.history));
        if let Some(cursor) = self.history_cursor {
            out.insert("historyIndex".into(), cursor.to_string());
        }
        out.insert("shuffle".into(), self.shuffle.to_string());

        let order: Vec<String> = self.playlists.iter().map(|p| p.name.clone()).collect();
        out.insert(PLAYLIST_ORDER_KEY.into(), join_list(&order));
        for p in &self.playlists {
            out.insert(format!("{PLAYLIST_PREFIX}{}", p.name), join_list(&p.tracks));
        }

        out
    }

    pub fn from_entries(entries: &BTreeMap<String, String>) -> Self {
        let get = |k: &str| entries.get(k).map(String::as_str);

        let volume = get("volume")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(DEFAULT_VOLUME);

        // Listed order first; `playlist.*` keys it doesn't mention go last.
        let mut names = get(PLAYLIST_ORDER_KEY).map(split_list).unwrap_or_default();
        names.retain(|n| entries.contains_key(&format!("{PLAYLIST_PREFIX}{n}")));
        for name in entries.keys().filter_map(|k| k.strip_prefix(PLAYLIST_PREFIX)) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        let playlists = names
            .into_iter()
            .map(|name| {
                let tracks = get(&format!("{PLAYLIST_PREFIX}{name}"))
                    .map(split_list)
                    .unwrap_or_default();
                Playlist { name, tracks }
            })
            .collect();

        Self {
            last_folder: get("lastFolder")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            volume,
            last_track: get("lastSong")
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            last_position_ms: get("lastPosition")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
            favorites: get("favorites").map(split_list).unwrap_or_default(),
            playlists,
            history: get("history").map(split_list).unwrap_or_default(),
            history_cursor: get("historyIndex").and_then(|v| v.trim().parse().ok()),
            shuffle: get("shuffle").map(|v| v.trim() == "true").unwrap_or(false),
        }
    }
}

fn join_list(items: &[String]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(LIST_DELIMITER);
        }
        out.push_str(item);
    }
    out
}

fn split_list(joined: &str) -> Vec<String> {
    joined
        .split(LIST_DELIMITER)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A flat key-value backing store.
pub trait KeyValueStore {
    fn load(&self) -> Result<BTreeMap<String, String>>;
    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()>;

    fn load_state(&self) -> Result<PersistedState> {
        Ok(PersistedState::from_entries(&self.load()?))
    }

    fn save_state(&self, state: &PersistedState) -> Result<()> {
        self.save(&state.to_entries())
    }
}

/// Settings as a JSON object of strings on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$OSULUX_CONFIG`, else `<config dir>/osulux/settings.json`,
    /// else `./osulux-settings.json` when the platform has no config dir.
    pub fn default_location() -> Self {
        if let Some(p) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Self::new(p);
        }
        match dirs::config_dir() {
            Some(dir) => Self::new(dir.join("osulux").join("settings.json")),
            None => Self::new("osulux-settings.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    /// Missing file = empty map (first launch).
    fn load(&self) -> Result<BTreeMap<String, String>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file yet");
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(Error::io(&self.path, e)),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let json = serde_json::to_vec_pretty(entries)?;
        std::fs::write(&self.path, json).map_err(|e| Error::io(&self.path, e))
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn load(&self) -> Result<BTreeMap<String, String>> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        *self.entries.lock().unwrap_or_else(|e| e.into_inner()) = entries.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PersistedState {
        PersistedState {
            last_folder: Some(PathBuf::from("/music/Songs")),
            volume: 0.8,
            last_track: Some("Bar - Foo".into()),
            last_position_ms: 42_000,
            favorites: vec!["Bar - Foo".into(), "A - B".into()],
            playlists: vec![Playlist {
                name: "Mix".into(),
                tracks: vec!["A - B".into()],
            }],
            history: vec!["A - B".into(), "Bar - Foo".into()],
            history_cursor: Some(1),
            shuffle: true,
        }
    }

    #[test]
    fn flat_keys_follow_the_documented_layout() {
        let entries = sample().to_entries();
        assert_eq!(entries["lastFolder"], "/music/Songs");
        assert_eq!(entries["lastSong"], "Bar - Foo");
        assert_eq!(entries["favorites"], "Bar - Foo\u{1f}A - B");
        assert_eq!(entries["playlist.Mix"], "A - B");
        assert_eq!(entries["historyIndex"], "1");
    }

    #[test]
    fn memory_store_keeps_state() {
        let store = MemoryStore::default();
        store.save_state(&sample()).unwrap();
        assert_eq!(store.load_state().unwrap(), sample());
    }

    #[test]
    fn playlist_order_survives_a_round_trip() {
        let mut state = sample();
        state.playlists = vec![
            Playlist {
                name: "Zed".into(),
                tracks: vec!["A - B".into()],
            },
            Playlist {
                name: "Alpha".into(),
                tracks: Vec::new(),
            },
        ];

        let entries = state.to_entries();
        assert_eq!(entries["playlists"], "Zed\u{1f}Alpha");
        assert_eq!(PersistedState::from_entries(&entries), state);
    }

    #[test]
    fn unlisted_playlist_keys_are_appended() {
        let mut entries = BTreeMap::new();
        entries.insert("playlists".to_string(), "Zed\u{1f}Ghost".to_string());
        entries.insert("playlist.Zed".to_string(), "A - B".to_string());
        entries.insert("playlist.Alpha".to_string(), String::new());

        let names: Vec<String> = PersistedState::from_entries(&entries)
            .playlists
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Zed", "Alpha"]);
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        let mut entries = BTreeMap::new();
        entries.insert("volume".to_string(), "loud".to_string());
        entries.insert("lastPosition".to_string(), "-3".to_string());
        entries.insert("favorites".to_string(), String::new());

        let state = PersistedState::from_entries(&entries);
        assert_eq!(state.volume, DEFAULT_VOLUME);
        assert_eq!(state.last_position_ms, 0);
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn volume_is_clamped() {
        let mut entries = BTreeMap::new();
        entries.insert("volume".to_string(), "7".to_string());
        assert_eq!(PersistedState::from_entries(&entries).volume, 1.0);
    }

    #[test]
    fn json_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("settings.json"));
        assert!(store.load().unwrap().is_empty());

        store.save_state(&sample()).unwrap();
        assert_eq!(store.load_state().unwrap(), sample());
    }
}
