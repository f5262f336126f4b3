//! core/session.rs
//!
//! `Library` = the one owner of all library state.
//!
//! It ties the pieces together so callers never have to remember the
//! follow-up work:
//! - installing a new catalog re-syncs "All", prunes user playlists and
//!   favorites, and re-syncs "Favorites" and "History"
//! - every favorites change re-syncs "Favorites"
//! - every history change re-syncs "History"
//!
//! The "History" playlist only shows names the current catalog has. The
//! history itself keeps every entry, so back/forward order is untouched.
//!
//! Mutations go through `&mut self`, so there is exactly one writer.
//! The catalog itself is an immutable snapshot (`Arc<Catalog>`) that gets
//! swapped, never edited. Readers on other threads hold a [`CatalogHandle`]
//! and keep whatever snapshot they took while a rescan runs.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use rand::Rng;
use tracing::{debug, info};

use super::error::PlaylistError;
use super::favorites::FavoritesSet;
use super::history::History;
use super::library::{self, ScanReport};
use super::playlists::{PlaylistStore, ReservedPlaylist};
use super::search;
use super::settings::PersistedState;
use super::types::Catalog;

/// Shared, swappable catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct CatalogHandle {
    inner: Arc<RwLock<Arc<Catalog>>>,
}

impl CatalogHandle {
    /// The current snapshot. Cheap: clones an `Arc`.
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn replace(&self, catalog: Arc<Catalog>) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = catalog;
    }
}

#[derive(Debug, Default)]
pub struct Library {
    root: Option<PathBuf>,
    catalog: CatalogHandle,
    playlists: PlaylistStore,
    favorites: FavoritesSet,
    history: History,
    shuffle: bool,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    // Catalog

    /// Scan `root` on the calling thread and install the result.
    pub fn index(&mut self, root: &Path) -> Arc<Catalog> {
        self.install(library::scan_library(root))
    }

    /// Install a finished scan (usually produced off-thread).
    pub fn install(&mut self, report: ScanReport) -> Arc<Catalog> {
        let catalog = Arc::new(report.catalog);

        self.playlists.sync_all(&catalog);
        self.playlists.prune_to_catalog(&catalog);
        let dropped = self.favorites.prune_to_catalog(&catalog);
        self.catalog.replace(Arc::clone(&catalog));
        self.sync_favorites();
        self.sync_history();

        if dropped > 0 {
            debug!(dropped, "favorites pruned after rescan");
        }
        info!(
            root = %report.root.display(),
            tracks = catalog.len(),
            skipped = report.skipped.len(),
            "catalog installed"
        );

        self.root = Some(report.root);
        catalog
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.snapshot()
    }

    pub fn catalog_handle(&self) -> CatalogHandle {
        self.catalog.clone()
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn resolve_audio_path(&self, name: &str) -> Option<PathBuf> {
        self.catalog().audio_path(name).map(Path::to_path_buf)
    }

    pub fn resolve_cover(&self, name: &str) -> Option<PathBuf> {
        library::resolve_cover_image(self.catalog().get(name)?)
    }

    pub fn resolve_video(&self, name: &str) -> Option<PathBuf> {
        library::resolve_video(self.catalog().get(name)?)
    }

    // Playlists

    pub fn playlist(&self, name: &str) -> &[String] {
        self.playlists.get(name)
    }

    pub fn playlist_names(&self) -> Vec<String> {
        self.playlists.names()
    }

    pub fn playlists(&self) -> &PlaylistStore {
        &self.playlists
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.playlists.is_reserved(name)
    }

    pub fn create_playlist(&mut self, name: &str) -> Result<(), PlaylistError> {
        self.playlists.create(name)
    }

    pub fn delete_playlist(&mut self, name: &str) -> Result<(), PlaylistError> {
        self.playlists.delete(name)
    }

    pub fn rename_playlist(&mut self, old: &str, new: &str) -> Result<(), PlaylistError> {
        self.playlists.rename(old, new)
    }

    pub fn add_to_playlist(&mut self, name: &str, track: &str) -> Result<bool, PlaylistError> {
        self.playlists.add(name, track)
    }

    pub fn remove_from_playlist(&mut self, name: &str, track: &str) -> Result<bool, PlaylistError> {
        self.playlists.remove(name, track)
    }

    // Favorites

    /// Returns whether `name` is now a favorite.
    pub fn toggle_favorite(&mut self, name: &str) -> bool {
        let now = self.favorites.toggle(name);
        self.sync_favorites();
        now
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.is_favorite(name)
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    fn sync_favorites(&mut self) {
        self.playlists.sync_favorites(self.favorites.iter());
    }

    // History

    pub fn record_play(&mut self, name: &str) {
        self.history.record_play(name);
        self.sync_history();
    }

    pub fn jump_to(&mut self, name: &str) {
        self.history.jump_to(name);
        self.sync_history();
    }

    /// A track was picked from `source` playlist.
    ///
    /// Picks from "Favorites" and "History" reuse the existing history entry
    /// ([`History::jump_to`]); anything else is a new play.
    pub fn choose(&mut self, name: &str, source: &str) {
        match ReservedPlaylist::from_name(source) {
            Some(ReservedPlaylist::Favorites | ReservedPlaylist::History) => self.jump_to(name),
            _ => self.record_play(name),
        }
    }

    pub fn step_back(&mut self) -> Option<String> {
        self.history.step_back().map(str::to_string)
    }

    pub fn step_forward(&mut self) -> Option<String> {
        self.history.step_forward().map(str::to_string)
    }

    pub fn current(&self) -> Option<&str> {
        self.history.current()
    }

    pub fn has_previous(&self) -> bool {
        self.history.has_previous()
    }

    pub fn has_next(&self) -> bool {
        self.history.has_next()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn sync_history(&mut self) {
        let catalog = self.catalog.snapshot();
        let recent = self.history.recent_unique();
        self.playlists.sync_history(
            recent
                .iter()
                .map(String::as_str)
                .filter(|n| catalog.contains(n)),
        );
    }

    // Navigation

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn set_shuffle(&mut self, on: bool) {
        self.shuffle = on;
    }

    /// Which track should follow the current one in `list`.
    ///
    /// Shuffle: any entry at random. Otherwise the entry after the current
    /// track, wrapping around; the first entry if the current track isn't in
    /// `list`. Does not touch history.
    pub fn next_track(&self, list: &[String]) -> Option<String> {
        if list.is_empty() {
            return None;
        }

        let i = if self.shuffle {
            rand::rng().random_range(0..list.len())
        } else {
            match self.current().and_then(|cur| list.iter().position(|n| n == cur)) {
                Some(cur) => (cur + 1) % list.len(),
                None => 0,
            }
        };

        Some(list[i].clone())
    }

    /// "Next" button: walk the redo tail first, else pick from `list` and record it.
    pub fn advance(&mut self, list: &[String]) -> Option<String> {
        if let Some(name) = self.step_forward() {
            return Some(name);
        }

        let name = self.next_track(list)?;
        self.record_play(&name);
        Some(name)
    }

    // Search

    pub fn search(&self, list: &[String], query: &str) -> Vec<String> {
        search::search(&self.catalog(), list, query)
    }

    // Persistence

    /// Library-owned parts of the persisted state. Volume and position belong
    /// to the caller, so they are passed in.
    pub fn persisted_state(&self, volume: f32, position_ms: u64) -> PersistedState {
        PersistedState {
            last_folder: self.root.clone(),
            volume: volume.clamp(0.0, 1.0),
            last_track: self.current().map(str::to_string),
            last_position_ms: position_ms,
            favorites: self.favorites.all().to_vec(),
            playlists: self.playlists.user_playlists().to_vec(),
            history: self.history.entries().to_vec(),
            history_cursor: self.history.cursor(),
            shuffle: self.shuffle,
        }
    }

    /// Load favorites, playlists, history and shuffle. Call before `index`,
    /// which prunes them against the fresh catalog.
    pub fn restore(&mut self, state: &PersistedState) {
        self.favorites = FavoritesSet::from_names(state.favorites.iter().cloned());
        self.playlists.restore_user(state.playlists.iter().cloned());
        self.history = History::restore(state.history.clone(), state.history_cursor);
        self.shuffle = state.shuffle;

        self.sync_favorites();
        self.sync_history();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TrackRecord;

    fn report(names: &[&str]) -> ScanReport {
        let mut catalog = Catalog::new();
        for n in names {
            catalog.insert(TrackRecord {
                name: n.to_string(),
                audio_path: PathBuf::from(format!("/songs/{n}/audio.mp3")),
                package_dir: PathBuf::from(format!("/songs/{n}")),
                tags: Vec::new(),
                creators: Vec::new(),
            });
        }
        ScanReport {
            root: PathBuf::from("/songs"),
            catalog,
            skipped: Vec::new(),
        }
    }

    fn list(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn install_syncs_all_and_prunes() {
        let mut lib = Library::new();
        lib.install(report(&["a", "b", "c"]));
        lib.add_to_playlist("Mix", "b").unwrap();
        lib.add_to_playlist("Mix", "c").unwrap();
        lib.toggle_favorite("c");

        lib.install(report(&["a", "b"]));

        assert_eq!(lib.playlist("All"), list(&["a", "b"]).as_slice());
        assert_eq!(lib.playlist("Mix"), list(&["b"]).as_slice());
        assert!(!lib.is_favorite("c"));
        assert!(lib.playlist("Favorites").is_empty());
    }

    #[test]
    fn favorites_playlist_follows_toggles() {
        let mut lib = Library::new();
        lib.install(report(&["a", "b"]));

        lib.toggle_favorite("b");
        lib.toggle_favorite("a");
        assert_eq!(lib.playlist("Favorites"), list(&["b", "a"]).as_slice());

        lib.toggle_favorite("b");
        assert_eq!(lib.playlist("Favorites"), list(&["a"]).as_slice());
    }

    #[test]
    fn creating_reserved_leaves_favorites_alone() {
        let mut lib = Library::new();
        lib.install(report(&["a"]));
        lib.toggle_favorite("a");

        assert!(lib.create_playlist("Favorites").is_err());
        assert_eq!(lib.playlist("Favorites"), list(&["a"]).as_slice());
    }

    #[test]
    fn history_playlist_is_newest_first() {
        let mut lib = Library::new();
        lib.install(report(&["a", "b"]));
        lib.record_play("a");
        lib.record_play("b");
        lib.record_play("a");
        assert_eq!(lib.playlist("History"), list(&["a", "b"]).as_slice());
    }

    #[test]
    fn rescan_hides_history_names_the_catalog_lost() {
        let mut lib = Library::new();
        lib.install(report(&["a", "b"]));
        lib.record_play("a");
        lib.record_play("b");

        let catalog = lib.install(report(&["b", "x"]));

        assert_eq!(lib.playlist("History"), list(&["b"]).as_slice());
        assert!(lib.playlist("History").iter().all(|n| catalog.contains(n)));
        assert_eq!(lib.history().entries(), list(&["a", "b"]).as_slice());

        lib.install(report(&["a", "b"]));
        assert_eq!(lib.playlist("History"), list(&["b", "a"]).as_slice());
    }

    #[test]
    fn restored_user_playlists_keep_their_order() {
        let mut lib = Library::new();
        lib.install(report(&["a"]));
        lib.create_playlist("Zed").unwrap();
        lib.create_playlist("Alpha").unwrap();
        lib.add_to_playlist("Alpha", "a").unwrap();

        let entries = lib.persisted_state(0.5, 0).to_entries();
        let mut restored = Library::new();
        restored.restore(&PersistedState::from_entries(&entries));

        assert_eq!(
            restored.playlist_names(),
            vec!["All", "Favorites", "History", "Zed", "Alpha"]
        );
        assert_eq!(restored.playlist("Alpha"), list(&["a"]).as_slice());
    }

    #[test]
    fn choose_from_favorites_does_not_truncate() {
        let mut lib = Library::new();
        lib.record_play("a");
        lib.record_play("b");
        lib.record_play("c");

        lib.choose("a", "Favorites");
        assert_eq!(lib.history().len(), 3);
        assert_eq!(lib.current(), Some("a"));

        lib.choose("z", "All");
        assert_eq!(lib.history().entries(), list(&["a", "z"]).as_slice());
    }

    #[test]
    fn next_track_wraps_around() {
        let mut lib = Library::new();
        let l = list(&["a", "b", "c"]);

        assert_eq!(lib.next_track(&l).as_deref(), Some("a"));
        lib.record_play("c");
        assert_eq!(lib.next_track(&l).as_deref(), Some("a"));
        lib.record_play("a");
        assert_eq!(lib.next_track(&l).as_deref(), Some("b"));
        assert_eq!(lib.next_track(&[]), None);
    }

    #[test]
    fn shuffle_picks_from_the_list() {
        let mut lib = Library::new();
        lib.set_shuffle(true);
        let l = list(&["a", "b", "c"]);
        for _ in 0..20 {
            let pick = lib.next_track(&l).unwrap();
            assert!(l.contains(&pick));
        }
    }

    #[test]
    fn advance_prefers_redo_tail() {
        let mut lib = Library::new();
        let l = list(&["a", "b", "c"]);
        lib.record_play("c");
        lib.record_play("b");
        lib.step_back();

        assert_eq!(lib.advance(&l).as_deref(), Some("b"));
        assert_eq!(lib.advance(&l).as_deref(), Some("c"));
        assert_eq!(lib.history().entries(), list(&["c", "b", "c"]).as_slice());
    }

    #[test]
    fn persisted_state_round_trip() {
        let mut lib = Library::new();
        lib.install(report(&["a", "b"]));
        lib.toggle_favorite("a");
        lib.add_to_playlist("Mix", "b").unwrap();
        lib.record_play("a");
        lib.record_play("b");
        lib.set_shuffle(true);

        let state = lib.persisted_state(0.3, 1234);
        assert_eq!(state.last_track.as_deref(), Some("b"));
        assert_eq!(state.last_folder, Some(PathBuf::from("/songs")));

        let mut restored = Library::new();
        restored.restore(&state);
        assert!(restored.is_favorite("a"));
        assert_eq!(restored.playlist("Mix"), list(&["b"]).as_slice());
        assert_eq!(restored.current(), Some("b"));
        assert!(restored.shuffle());
        assert_eq!(restored.playlist("Favorites"), list(&["a"]).as_slice());
    }

    #[test]
    fn old_snapshot_survives_rescan() {
        let mut lib = Library::new();
        lib.install(report(&["a"]));
        let handle = lib.catalog_handle();
        let old = handle.snapshot();

        lib.install(report(&["x", "y"]));

        assert_eq!(old.len(), 1);
        assert_eq!(handle.snapshot().len(), 2);
    }
}
