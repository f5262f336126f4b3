//! core/descriptor/mod.rs
//!
//! Descriptor file reading.
//!
//! A package folder holds one or more descriptor files (`*.osu`): line-based
//! text with `[Section]` headers and `Key:Value` pairs. We only care about a
//! handful of keys:
//!
//! - `Title:`, `Artist:`, `AudioFilename:` anywhere in the file ([`TrackInfo`])
//! - `Tags:` and `Creator:` inside `[Metadata]`
//! - the background image line (`0,0,"bg.jpg",...`) inside `[Events]`
//!
//! Public API:
//! - [`Descriptor::load`] reads a file once; its methods run the parsers on
//!   the loaded text. The indexer uses this so a file is read a single time.
//! - [`parse_track_info`], [`parse_tags`], [`parse_creator`],
//!   [`parse_background_image`] are path-in, value-out conveniences that
//!   swallow IO errors (unreadable file = nothing found).

mod parse;
mod read;

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::Result;
use super::types::TrackInfo;

pub use parse::{background_image, creators, tags, track_info};
pub use read::{DESCRIPTOR_EXT, is_descriptor, read_descriptor_text};

/// A descriptor file loaded into memory.
#[derive(Debug, Clone)]
pub struct Descriptor {
    path: PathBuf,
    text: String,
}

impl Descriptor {
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_descriptor_text(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn track_info(&self) -> Option<TrackInfo> {
        track_info(&self.text)
    }

    pub fn tags(&self) -> Vec<String> {
        tags(&self.text)
    }

    pub fn creators(&self) -> Vec<String> {
        creators(&self.text)
    }

    pub fn background_image(&self) -> Option<String> {
        background_image(&self.text)
    }
}

fn load_quietly(path: &Path) -> Option<Descriptor> {
    match Descriptor::load(path) {
        Ok(d) => Some(d),
        Err(e) => {
            debug!(error = %e, "descriptor unreadable");
            None
        }
    }
}

pub fn parse_track_info(path: &Path) -> Option<TrackInfo> {
    load_quietly(path)?.track_info()
}

pub fn parse_tags(path: &Path) -> Vec<String> {
    load_quietly(path).map(|d| d.tags()).unwrap_or_default()
}

pub fn parse_creator(path: &Path) -> Vec<String> {
    load_quietly(path).map(|d| d.creators()).unwrap_or_default()
}

pub fn parse_background_image(path: &Path) -> Option<String> {
    load_quietly(path)?.background_image()
}
