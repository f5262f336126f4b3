//! core/export.rs
//!
//! Copy tracks out of the library into a plain folder, named by display name.
//! Ex: `Bar - Foo` with `audio.mp3` -> `<dest>/Bar - Foo.mp3`

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::error::{Error, Result};
use super::types::Catalog;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub exported: Vec<PathBuf>,
    /// Display names that could not be exported.
    pub failed: Vec<String>,
}

/// Replace characters that are illegal in file names on common platforms.
pub fn safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}

/// Copy one track's audio file into `dest` (created if needed, existing file overwritten).
pub fn export_track(catalog: &Catalog, name: &str, dest: &Path) -> Result<PathBuf> {
    let source = catalog
        .audio_path(name)
        .ok_or_else(|| Error::UnknownTrack(name.to_string()))?;

    std::fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;

    let mut file_name = safe_file_name(name);
    if let Some(ext) = source.extension().and_then(|e| e.to_str()) {
        file_name.push('.');
        file_name.push_str(ext);
    }

    let target = dest.join(file_name);
    std::fs::copy(source, &target).map_err(|e| Error::io(source, e))?;

    info!(track = name, target = %target.display(), "track exported");
    Ok(target)
}

/// Export every entry of a playlist. One failure doesn't stop the rest.
pub fn export_playlist(catalog: &Catalog, names: &[String], dest: &Path) -> ExportSummary {
    let mut summary = ExportSummary::default();

    for name in names {
        match export_track(catalog, name, dest) {
            Ok(path) => summary.exported.push(path),
            Err(e) => {
                warn!(track = %name, error = %e, "export failed");
                summary.failed.push(name.clone());
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TrackRecord;

    #[test]
    fn unsafe_characters_become_underscores() {
        assert_eq!(safe_file_name("AC/DC - What?"), "AC_DC - What_");
        assert_eq!(safe_file_name("a<b>c|d:e*f\"g\\h"), "a_b_c_d_e_f_g_h");
    }

    #[test]
    fn export_copies_with_display_name() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let audio = src.path().join("audio.ogg");
        std::fs::write(&audio, b"sound").unwrap();

        let mut catalog = Catalog::new();
        catalog.insert(TrackRecord {
            name: "Bar - Foo".into(),
            audio_path: audio,
            package_dir: src.path().to_path_buf(),
            tags: Vec::new(),
            creators: Vec::new(),
        });

        let names = vec!["Bar - Foo".to_string(), "Missing - Track".to_string()];
        let summary = export_playlist(&catalog, &names, &dest.path().join("out"));

        let expected = dest.path().join("out").join("Bar - Foo.ogg");
        assert_eq!(summary.exported, vec![expected.clone()]);
        assert_eq!(summary.failed, vec!["Missing - Track".to_string()]);
        assert_eq!(std::fs::read(expected).unwrap(), b"sound");
    }
}
