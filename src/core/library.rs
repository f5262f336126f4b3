//! core/library.rs
//!
//! Library indexer: root folder -> `Catalog`.
//!
//! Layout on disk:
//! ```text
//! Songs/                  <- root
//!   123 Artist - Title/   <- package (one per track)
//!     map [Hard].osu      <- descriptor(s)
//!     audio.mp3
//!     bg.jpg              (optional)
//!     clip.mp4            (optional)
//! ```
//!
//! Only one level of subfolders is looked at. Each package is scanned on the
//! rayon pool, then results are merged on the calling thread in package-name
//! order. That merge order is the tie-break for duplicate display names, so
//! the same folder always produces the same Catalog.
//!
//! Nothing in here fails the whole scan. A bad file or package becomes a
//! `Skipped` entry in the `ScanReport` and the rest carries on.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use super::descriptor::{self, Descriptor};
use super::error::{Error, Result};
use super::types::{Catalog, TrackRecord};

/// Video files we recognise inside a package (lowercase, no dot).
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "flv", "mkv", "webm", "mov", "wmv", "m4v", "mpg", "mpeg",
];

/// Result of one scan: the catalog plus everything that got dropped and why.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub root: PathBuf,
    pub catalog: Catalog,
    pub skipped: Vec<Skipped>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The root folder itself is missing or not a folder.
    RootUnavailable,
    /// Directory listing or file read failed.
    Unreadable(String),
    /// Descriptor lacks Title, Artist or AudioFilename.
    MissingFields,
    /// Descriptor points at an audio file that isn't there.
    MissingAudio(PathBuf),
    /// Package has no descriptor that yields a playable track.
    NoPlayableDescriptor,
    /// Another package already claimed this display name.
    DuplicateName(String),
}

/// Build the Catalog for `root`. Missing root = empty Catalog.
pub fn build_catalog(root: &Path) -> Catalog {
    scan_library(root).catalog
}

/// Full scan with diagnostics.
pub fn scan_library(root: &Path) -> ScanReport {
    let mut report = ScanReport {
        root: root.to_path_buf(),
        ..ScanReport::default()
    };

    let packages = match list_packages(root) {
        Ok(p) => p,
        Err(e) => {
            debug!(error = %e, "library root unavailable");
            report.skipped.push(Skipped {
                path: root.to_path_buf(),
                reason: SkipReason::RootUnavailable,
            });
            return report;
        }
    };

    // par_iter + collect keeps input order, so the merge below is deterministic.
    let outcomes: Vec<PackageOutcome> = packages.par_iter().map(|p| scan_package(p)).collect();

    for outcome in outcomes {
        report.skipped.extend(outcome.skipped);

        let Some(record) = outcome.record else {
            continue;
        };

        let name = record.name.clone();
        let package_dir = record.package_dir.clone();
        if !report.catalog.insert(record) {
            debug!(%name, package = %package_dir.display(), "duplicate display name dropped");
            report.skipped.push(Skipped {
                path: package_dir,
                reason: SkipReason::DuplicateName(name),
            });
        }
    }

    info!(
        root = %root.display(),
        packages = packages.len(),
        tracks = report.catalog.len(),
        skipped = report.skipped.len(),
        "library scan finished"
    );

    report
}

/// Immediate subfolders of `root`, sorted by path.
pub fn list_packages(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let entries = std::fs::read_dir(root).map_err(|e| Error::io(root, e))?;

    let mut out: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();

    out.sort();
    Ok(out)
}

/// Entries named `*.osu` directly inside `package_dir`, sorted by path.
///
/// Not filtered by file type: an entry that turns out unreadable is reported
/// by the scan instead of vanishing.
pub fn list_descriptors(package_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(package_dir).map_err(|e| Error::io(package_dir, e))?;

    let mut out: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| descriptor::is_descriptor(path))
        .collect();

    out.sort();
    Ok(out)
}

struct PackageOutcome {
    record: Option<TrackRecord>,
    skipped: Vec<Skipped>,
}

/// First descriptor whose audio file exists wins the package.
fn scan_package(package_dir: &Path) -> PackageOutcome {
    let mut skipped = Vec::new();

    let descriptors = match list_descriptors(package_dir) {
        Ok(d) => d,
        Err(e) => {
            skipped.push(Skipped {
                path: package_dir.to_path_buf(),
                reason: SkipReason::Unreadable(e.to_string()),
            });
            return PackageOutcome {
                record: None,
                skipped,
            };
        }
    };

    for path in descriptors {
        let desc = match Descriptor::load(&path) {
            Ok(d) => d,
            Err(e) => {
                debug!(error = %e, "descriptor skipped");
                skipped.push(Skipped {
                    path,
                    reason: SkipReason::Unreadable(e.to_string()),
                });
                continue;
            }
        };

        let Some(info) = desc.track_info() else {
            skipped.push(Skipped {
                path,
                reason: SkipReason::MissingFields,
            });
            continue;
        };

        let audio_path = package_dir.join(&info.audio_filename);
        if !audio_path.is_file() {
            skipped.push(Skipped {
                path,
                reason: SkipReason::MissingAudio(audio_path),
            });
            continue;
        }

        let record = TrackRecord {
            name: info.display_name(),
            audio_path: absolute(&audio_path),
            package_dir: absolute(package_dir),
            tags: desc.tags(),
            creators: desc.creators(),
        };

        return PackageOutcome {
            record: Some(record),
            skipped,
        };
    }

    skipped.push(Skipped {
        path: package_dir.to_path_buf(),
        reason: SkipReason::NoPlayableDescriptor,
    });

    PackageOutcome {
        record: None,
        skipped,
    }
}

/// Background image of the track's package, if any descriptor names one that exists.
pub fn resolve_cover_image(record: &TrackRecord) -> Option<PathBuf> {
    let descriptors = list_descriptors(&record.package_dir).ok()?;

    descriptors.iter().find_map(|path| {
        let file_name = descriptor::parse_background_image(path)?;
        let candidate = record.package_dir.join(file_name);
        candidate.is_file().then_some(candidate)
    })
}

/// First video file in the track's package (by file name).
pub fn resolve_video(record: &TrackRecord) -> Option<PathBuf> {
    let entries = std::fs::read_dir(&record.package_dir).ok()?;

    let mut videos: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_video(path))
        .collect();

    videos.sort();
    videos.into_iter().next()
}

pub fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| VIDEO_EXTENSIONS.iter().any(|v| ext.eq_ignore_ascii_case(v)))
        .unwrap_or(false)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_extension_any_case() {
        assert!(is_video(Path::new("clip.MP4")));
        assert!(is_video(Path::new("clip.webm")));
        assert!(!is_video(Path::new("audio.mp3")));
        assert!(!is_video(Path::new("mp4")));
    }

    #[test]
    fn missing_root_is_empty_catalog() {
        let report = scan_library(Path::new("definitely/not/a/real/folder"));
        assert!(report.catalog.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::RootUnavailable);
    }
}
