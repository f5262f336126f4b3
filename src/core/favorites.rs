//! core/favorites.rs
//! Favorite tracks, by display name, in the order they were added.

use std::collections::HashSet;

use super::types::Catalog;

#[derive(Debug, Clone, Default)]
pub struct FavoritesSet {
    order: Vec<String>,
    members: HashSet<String>,
}

/// Set equality; order is not compared.
impl PartialEq for FavoritesSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for FavoritesSet {}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert(name.into());
        }
        set
    }

    /// Add if absent, remove if present. Returns whether `name` is now a favorite.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.members.remove(name) {
            self.order.retain(|n| n != name);
            false
        } else {
            self.insert(name.to_string());
            true
        }
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    /// Insertion order.
    pub fn all(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Forget favorites the catalog no longer has. Returns how many were dropped.
    pub fn prune_to_catalog(&mut self, catalog: &Catalog) -> usize {
        let before = self.order.len();
        self.order.retain(|n| catalog.contains(n));
        self.members.retain(|n| catalog.contains(n));
        before - self.order.len()
    }

    fn insert(&mut self, name: String) {
        if self.members.insert(name.clone()) {
            self.order.push(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::types::TrackRecord;

    #[test]
    fn toggle_twice_restores_state() {
        let mut favs = FavoritesSet::from_names(["a", "b"]);
        let before = favs.clone();

        assert!(favs.toggle("c"));
        assert!(favs.is_favorite("c"));
        assert!(!favs.toggle("c"));
        assert_eq!(favs, before);

        assert!(!favs.toggle("a"));
        assert!(favs.toggle("a"));
        assert_eq!(favs, before);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut favs = FavoritesSet::new();
        favs.toggle("z");
        favs.toggle("a");
        favs.toggle("m");
        assert_eq!(favs.all(), &["z".to_string(), "a".to_string(), "m".to_string()]);
    }

    #[test]
    fn duplicate_names_collapse() {
        let favs = FavoritesSet::from_names(["a", "a"]);
        assert_eq!(favs.len(), 1);
    }

    #[test]
    fn prune_drops_missing_tracks() {
        let mut catalog = Catalog::new();
        catalog.insert(TrackRecord {
            name: "keep".into(),
            audio_path: PathBuf::from("keep.mp3"),
            package_dir: PathBuf::from("keep"),
            tags: Vec::new(),
            creators: Vec::new(),
        });

        let mut favs = FavoritesSet::from_names(["keep", "gone"]);
        assert_eq!(favs.prune_to_catalog(&catalog), 1);
        assert!(favs.is_favorite("keep"));
        assert!(!favs.is_favorite("gone"));
    }
}
