//! core/playlists.rs
//!
//! Named, ordered, duplicate-free lists of display names.
//!
//! Two kinds of playlist live here:
//! - built-in ones (`All`, `Favorites`, `History`), modelled as
//!   [`ReservedPlaylist`]. Their contents are synced from the catalog,
//!   the favorites set and the history; users can't create, rename, delete
//!   or edit them.
//! - user playlists, kept in creation order.

use super::error::PlaylistError;
use super::types::Catalog;

/// The built-in playlists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedPlaylist {
    All,
    Favorites,
    History,
}

impl ReservedPlaylist {
    pub const ALL: [ReservedPlaylist; 3] = [Self::All, Self::Favorites, Self::History];

    pub fn name(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Favorites => "Favorites",
            Self::History => "History",
        }
    }

    /// Exact, case-sensitive match.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

pub fn is_reserved(name: &str) -> bool {
    ReservedPlaylist::from_name(name).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub name: String,
    pub tracks: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PlaylistStore {
    all: Vec<String>,
    favorites: Vec<String>,
    history: Vec<String>,
    user: Vec<Playlist>,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        is_reserved(name)
    }

    /// Reserved names first, then user playlists in creation order.
    pub fn names(&self) -> Vec<String> {
        ReservedPlaylist::ALL
            .iter()
            .map(|r| r.name().to_string())
            .chain(self.user.iter().map(|p| p.name.clone()))
            .collect()
    }

    pub fn user_playlists(&self) -> &[Playlist] {
        &self.user
    }

    pub fn contains(&self, name: &str) -> bool {
        is_reserved(name) || self.user_index(name).is_some()
    }

    /// Contents of `name`, or an empty slice when there is no such playlist.
    pub fn get(&self, name: &str) -> &[String] {
        match ReservedPlaylist::from_name(name) {
            Some(ReservedPlaylist::All) => &self.all,
            Some(ReservedPlaylist::Favorites) => &self.favorites,
            Some(ReservedPlaylist::History) => &self.history,
            None => self
                .user_index(name)
                .map(|i| self.user[i].tracks.as_slice())
                .unwrap_or(&[]),
        }
    }

    pub fn create(&mut self, name: &str) -> Result<(), PlaylistError> {
        let name = validate_new_name(name)?;
        if self.user_index(name).is_some() {
            return Err(PlaylistError::AlreadyExists(name.to_string()));
        }

        self.user.push(Playlist {
            name: name.to_string(),
            tracks: Vec::new(),
        });
        Ok(())
    }

    pub fn delete(&mut self, name: &str) -> Result<(), PlaylistError> {
        if is_reserved(name) {
            return Err(PlaylistError::Reserved(name.to_string()));
        }
        let i = self
            .user_index(name)
            .ok_or_else(|| PlaylistError::NotFound(name.to_string()))?;

        self.user.remove(i);
        Ok(())
    }

    /// Rename in place; position and contents are kept.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), PlaylistError> {
        if is_reserved(old) {
            return Err(PlaylistError::Reserved(old.to_string()));
        }
        let new = validate_new_name(new)?;
        let i = self
            .user_index(old)
            .ok_or_else(|| PlaylistError::NotFound(old.to_string()))?;
        if old != new && self.user_index(new).is_some() {
            return Err(PlaylistError::AlreadyExists(new.to_string()));
        }

        self.user[i].name = new.to_string();
        Ok(())
    }

    /// Append `track` unless already present. Creates the playlist if missing.
    /// Returns whether the track was added. `name` is trimmed first.
    pub fn add(&mut self, name: &str, track: &str) -> Result<bool, PlaylistError> {
        let name = name.trim();
        if is_reserved(name) {
            return Err(PlaylistError::Reserved(name.to_string()));
        }

        let i = match self.user_index(name) {
            Some(i) => i,
            None => {
                self.create(name)?;
                self.user.len() - 1
            }
        };

        let tracks = &mut self.user[i].tracks;
        if tracks.iter().any(|t| t == track) {
            return Ok(false);
        }
        tracks.push(track.to_string());
        Ok(true)
    }

    /// Returns whether something was removed.
    pub fn remove(&mut self, name: &str, track: &str) -> Result<bool, PlaylistError> {
        let name = name.trim();
        if is_reserved(name) {
            return Err(PlaylistError::Reserved(name.to_string()));
        }
        let i = self
            .user_index(name)
            .ok_or_else(|| PlaylistError::NotFound(name.to_string()))?;

        let tracks = &mut self.user[i].tracks;
        let before = tracks.len();
        tracks.retain(|t| t != track);
        Ok(tracks.len() != before)
    }

    /// "All" becomes the catalog's enumeration order.
    pub fn sync_all(&mut self, catalog: &Catalog) {
        self.all = catalog.names().map(str::to_string).collect();
    }

    pub fn sync_favorites<'a>(&mut self, favorites: impl IntoIterator<Item = &'a str>) {
        self.favorites = dedup(favorites);
    }

    pub fn sync_history<'a>(&mut self, recent: impl IntoIterator<Item = &'a str>) {
        self.history = dedup(recent);
    }

    /// Drop user-playlist entries that the catalog no longer has.
    pub fn prune_to_catalog(&mut self, catalog: &Catalog) {
        for playlist in &mut self.user {
            playlist.tracks.retain(|t| catalog.contains(t));
        }
    }

    /// Replace user playlists wholesale (startup restore).
    ///
    /// Reserved names and blank names are dropped; duplicate names and
    /// duplicate entries collapse onto the first occurrence.
    pub fn restore_user(&mut self, playlists: impl IntoIterator<Item = Playlist>) {
        self.user.clear();
        for p in playlists {
            if self.create(&p.name).is_err() {
                continue;
            }
            for track in &p.tracks {
                // create() just succeeded, so add() can only report duplicates.
                let _ = self.add(&p.name, track);
            }
        }
    }

    fn user_index(&self, name: &str) -> Option<usize> {
        self.user.iter().position(|p| p.name == name)
    }
}

fn validate_new_name(name: &str) -> Result<&str, PlaylistError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PlaylistError::Blank);
    }
    if is_reserved(trimmed) {
        return Err(PlaylistError::Reserved(trimmed.to_string()));
    }
    Ok(trimmed)
}

fn dedup<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::types::TrackRecord;

    fn catalog(names: &[&str]) -> Catalog {
        let mut c = Catalog::new();
        for n in names {
            c.insert(TrackRecord {
                name: n.to_string(),
                audio_path: PathBuf::from(format!("{n}.mp3")),
                package_dir: PathBuf::from(n),
                tags: Vec::new(),
                creators: Vec::new(),
            });
        }
        c
    }

    #[test]
    fn reserved_names_are_rejected() {
        let mut store = PlaylistStore::new();
        for name in ["All", "Favorites", "History"] {
            assert_eq!(
                store.create(name),
                Err(PlaylistError::Reserved(name.to_string()))
            );
            assert_eq!(
                store.delete(name),
                Err(PlaylistError::Reserved(name.to_string()))
            );
        }
        assert!(store.user_playlists().is_empty());
    }

    #[test]
    fn reserved_match_is_case_sensitive() {
        let mut store = PlaylistStore::new();
        assert!(store.create("favorites").is_ok());
        assert!(store.is_reserved("Favorites"));
        assert!(!store.is_reserved("favorites"));
    }

    #[test]
    fn blank_and_duplicate_names_are_rejected() {
        let mut store = PlaylistStore::new();
        assert_eq!(store.create("   "), Err(PlaylistError::Blank));
        store.create("Chill").unwrap();
        assert_eq!(
            store.create("Chill"),
            Err(PlaylistError::AlreadyExists("Chill".into()))
        );
    }

    #[test]
    fn add_creates_and_suppresses_duplicates() {
        let mut store = PlaylistStore::new();
        assert_eq!(store.add("Mix", "A - 1"), Ok(true));
        assert_eq!(store.add("Mix", "B - 2"), Ok(true));
        assert_eq!(store.add("Mix", "A - 1"), Ok(false));

        assert_eq!(store.get("Mix"), &["A - 1".to_string(), "B - 2".to_string()]);
    }

    #[test]
    fn add_to_reserved_is_rejected() {
        let mut store = PlaylistStore::new();
        assert!(store.add("All", "A - 1").is_err());
        assert!(store.get("All").is_empty());
    }

    #[test]
    fn padded_name_reaches_the_existing_playlist() {
        let mut store = PlaylistStore::new();
        store.create("Mix").unwrap();

        assert_eq!(store.add(" Mix ", "A - 1"), Ok(true));
        assert_eq!(store.get("Mix"), &["A - 1".to_string()]);
        assert_eq!(store.remove("Mix ", "A - 1"), Ok(true));
        assert_eq!(store.names().len(), 4);
    }

    #[test]
    fn remove_entry() {
        let mut store = PlaylistStore::new();
        store.add("Mix", "A - 1").unwrap();
        assert_eq!(store.remove("Mix", "A - 1"), Ok(true));
        assert_eq!(store.remove("Mix", "A - 1"), Ok(false));
        assert_eq!(
            store.remove("Nope", "A - 1"),
            Err(PlaylistError::NotFound("Nope".into()))
        );
    }

    #[test]
    fn unknown_playlist_is_empty() {
        let store = PlaylistStore::new();
        assert!(store.get("whatever").is_empty());
    }

    #[test]
    fn names_list_reserved_first() {
        let mut store = PlaylistStore::new();
        store.create("Zed").unwrap();
        store.create("Alpha").unwrap();
        assert_eq!(
            store.names(),
            vec!["All", "Favorites", "History", "Zed", "Alpha"]
        );
    }

    #[test]
    fn rename_keeps_contents() {
        let mut store = PlaylistStore::new();
        store.add("Old", "A - 1").unwrap();
        store.rename("Old", "New").unwrap();

        assert!(store.get("Old").is_empty());
        assert_eq!(store.get("New"), &["A - 1".to_string()]);
        assert_eq!(
            store.rename("New", "History"),
            Err(PlaylistError::Reserved("History".into()))
        );
    }

    #[test]
    fn sync_all_follows_catalog_order() {
        let mut store = PlaylistStore::new();
        store.sync_all(&catalog(&["b", "a"]));
        assert_eq!(store.get("All"), &["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn prune_leaves_only_catalog_entries() {
        let mut store = PlaylistStore::new();
        store.add("Mix", "keep").unwrap();
        store.add("Mix", "gone").unwrap();
        store.add("Other", "gone").unwrap();

        let c = catalog(&["keep"]);
        store.prune_to_catalog(&c);

        for p in store.user_playlists() {
            assert!(p.tracks.iter().all(|t| c.contains(t)));
        }
        assert_eq!(store.get("Mix"), &["keep".to_string()]);
        assert!(store.get("Other").is_empty());
    }

    #[test]
    fn restore_drops_reserved_and_duplicates() {
        let mut store = PlaylistStore::new();
        store.restore_user(vec![
            Playlist {
                name: "Favorites".into(),
                tracks: vec!["x".into()],
            },
            Playlist {
                name: "Mix".into(),
                tracks: vec!["a".into(), "a".into(), "b".into()],
            },
        ]);

        assert_eq!(store.user_playlists().len(), 1);
        assert_eq!(store.get("Mix"), &["a".to_string(), "b".to_string()]);
    }
}
