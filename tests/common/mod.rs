//! Builders for on-disk Songs folders.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Minimal descriptor text with the fields the indexer reads.
pub fn descriptor(title: &str, artist: &str, audio: &str, tags: &str, creator: &str) -> String {
    format!(
        "osu file format v14\n\
         \n\
         [General]\n\
         AudioFilename: {audio}\n\
         \n\
         [Metadata]\n\
         Title:{title}\n\
         Artist:{artist}\n\
         Creator:{creator}\n\
         Tags:{tags}\n\
         \n\
         [Events]\n\
         //Background and Video events\n\
         0,0,\"bg.jpg\",0,0\n"
    )
}

/// Create `root/<dir>` holding one descriptor and (optionally) the audio file.
pub fn package(
    root: &Path,
    dir: &str,
    title: &str,
    artist: &str,
    with_audio: bool,
) -> PathBuf {
    let pkg = root.join(dir);
    fs::create_dir_all(&pkg).unwrap();
    fs::write(
        pkg.join(format!("{artist} - {title} (Mapper) [Hard].osu")),
        descriptor(title, artist, "audio.mp3", "anime rock", "Alice"),
    )
    .unwrap();
    if with_audio {
        fs::write(pkg.join("audio.mp3"), b"not really mp3").unwrap();
    }
    pkg
}
