//! Core data types shared between core logic and the UI.
//!
//! Rule of thumb:
//! - These structs should be "boring bags of data"
//! - No GUI code
//! - No descriptor parsing code
//!
//! `TrackRecord` is ONE playable track: the package folder it came from plus
//! the metadata we pulled out of its descriptor file.
//! `Catalog` is every track found under one root folder.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The three fields a descriptor must carry for its package to be playable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
    /// Relative to the package folder.
    pub audio_filename: String,
}

impl TrackInfo {
    /// Catalog key: `"{artist} - {title}"`.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

/// One playable track.
///
/// Built once during a scan and never mutated. A rescan builds a new
/// `Catalog` instead of editing records in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    /// Display name, unique within a Catalog.
    pub name: String,

    /// Absolute path of the audio file (checked to exist at scan time).
    pub audio_path: PathBuf,

    /// Absolute path of the package folder. Cover and video lookups start here.
    pub package_dir: PathBuf,

    /// `Tags:` tokens in file order. May be empty.
    pub tags: Vec<String>,

    /// `Creator:` value. Zero or one entry in practice.
    pub creators: Vec<String>,
}

/// Display name -> TrackRecord, in insertion order.
///
/// Insertion order is the order of the "All" playlist.
/// Keys are unique: the first record inserted under a name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tracks: Vec<TrackRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the display name is taken. Returns whether it went in.
    pub fn insert(&mut self, record: TrackRecord) -> bool {
        if self.index.contains_key(&record.name) {
            return false;
        }
        self.index.insert(record.name.clone(), self.tracks.len());
        self.tracks.push(record);
        true
    }

    pub fn get(&self, name: &str) -> Option<&TrackRecord> {
        self.index.get(name).map(|&i| &self.tracks[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn audio_path(&self, name: &str) -> Option<&Path> {
        self.get(name).map(|t| t.audio_path.as_path())
    }

    /// Display names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tracks.iter().map(|t| t.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackRecord> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
