//! core/error.rs
//!
//! One error type for the engine.
//!
//! Most of the engine never returns these to the GUI: scan problems become
//! `Skipped` entries in a `ScanReport`, and navigation at a boundary is just
//! `None`. What is left is real IO (settings, export), bad playlist commands,
//! and playback setup.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a folder: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Playlist(#[from] PlaylistError),

    #[error("settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("unknown track: {0}")]
    UnknownTrack(String),

    #[error("playback: {0}")]
    Playback(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why a playlist command was rejected. A rejected command never mutates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    #[error("\"{0}\" is a built-in playlist")]
    Reserved(String),

    #[error("a playlist named \"{0}\" already exists")]
    AlreadyExists(String),

    #[error("playlist name is blank")]
    Blank,

    #[error("no playlist named \"{0}\"")]
    NotFound(String),
}
