//! core/descriptor/read.rs
//! Bytes on disk -> descriptor text.

use std::path::Path;

use tracing::debug;

use crate::core::error::{Error, Result};

/// Descriptor file extension (matched case-insensitively).
pub const DESCRIPTOR_EXT: &str = "osu";

/// True for file names ending in `.osu`, any case.
pub fn is_descriptor(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|n| n.ends_with(&format!(".{DESCRIPTOR_EXT}")))
}

/// Read a descriptor as text.
///
/// UTF-8 first (leading BOM dropped). Anything that is not valid UTF-8 is
/// decoded as Latin-1, which maps every byte to a char and so never fails.
pub fn read_descriptor_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(decode(bytes, path))
}

fn decode(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => match text.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => text,
        },
        Err(e) => {
            debug!(path = %path.display(), "descriptor is not UTF-8, reading as Latin-1");
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_extension_any_case() {
        assert!(is_descriptor(Path::new("a/map.osu")));
        assert!(is_descriptor(Path::new("a/MAP [Hard].OSU")));
        assert!(!is_descriptor(Path::new("a/map.osz")));
        assert!(!is_descriptor(Path::new("a/osu")));
    }

    #[test]
    fn utf8_bom_is_dropped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"Title:Foo");
        assert_eq!(decode(bytes, Path::new("x.osu")), "Title:Foo");
    }

    #[test]
    fn invalid_utf8_falls_back_to_latin1() {
        // "Café" with é as a single Latin-1 byte.
        let bytes = vec![b'C', b'a', b'f', 0xE9];
        assert_eq!(decode(bytes, Path::new("x.osu")), "Café");
    }
}
