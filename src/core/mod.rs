//! core/mod.rs
//!
//! The brain of the app. No iced imports below this line.
//!
//! The pipeline, bottom-up:
//!   (A) `descriptor`: read one `.osu` file, pull out title/artist/audio,
//!       tags, creators, background image
//!   (B) `library`: walk a Songs root, one track per package folder
//!       -> immutable `Catalog`
//!   (C) `playlists`, `favorites`, `history`, `search`: user state over
//!       display names
//!   (D) `session::Library`: owns (B) + (C) and keeps the built-in
//!       playlists in sync
//!   (E) `settings`: what survives a restart; `export`: copy files out
//!
//! `playback` is separate: it only ever sees a path to an audio file.

pub mod descriptor;
pub mod error;
pub mod export;
pub mod favorites;
pub mod history;
pub mod library;
pub mod playback;
pub mod playlists;
pub mod search;
pub mod session;
pub mod settings;
pub mod types;

pub use error::{Error, PlaylistError, Result};
pub use library::{ScanReport, SkipReason, Skipped, build_catalog, scan_library};
pub use playlists::ReservedPlaylist;
pub use session::{CatalogHandle, Library};
pub use settings::{JsonFileStore, KeyValueStore, MemoryStore, PersistedState};
pub use types::{Catalog, TrackInfo, TrackRecord};
