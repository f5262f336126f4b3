//! core/descriptor/parse.rs
//! Pure text -> value parsers. No IO here, so everything is easy to unit test.

use crate::core::types::TrackInfo;

const METADATA: &str = "[Metadata]";
const EVENTS: &str = "[Events]";

/// `Title:`, `Artist:` and `AudioFilename:`, searched across the whole file.
///
/// First occurrence of each key wins; we stop reading once all three are found.
/// Missing any of them = `None`.
pub fn track_info(text: &str) -> Option<TrackInfo> {
    let mut title: Option<String> = None;
    let mut artist: Option<String> = None;
    let mut audio_filename: Option<String> = None;

    for line in text.lines().map(str::trim_start) {
        if title.is_none() {
            if let Some(v) = strip_key(line, "Title:") {
                title = Some(v.trim().to_string());
            }
        }
        if artist.is_none() {
            if let Some(v) = strip_key(line, "Artist:") {
                artist = Some(v.trim().to_string());
            }
        }
        if audio_filename.is_none() {
            if let Some(v) = strip_key(line, "AudioFilename:") {
                audio_filename = Some(v.trim().to_string());
            }
        }

        if title.is_some() && artist.is_some() && audio_filename.is_some() {
            break;
        }
    }

    Some(TrackInfo {
        title: title?,
        artist: artist?,
        audio_filename: audio_filename?,
    })
}

/// First `Tags:` line of `[Metadata]`, split on whitespace.
pub fn tags(text: &str) -> Vec<String> {
    section_lines(text, METADATA)
        .find_map(|line| strip_key(line, "Tags:"))
        .map(|v| v.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// First `Creator:` line of `[Metadata]`. Blank value = no creator.
pub fn creators(text: &str) -> Vec<String> {
    section_lines(text, METADATA)
        .find_map(|line| strip_key(line, "Creator:"))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| vec![v.to_string()])
        .unwrap_or_default()
}

/// Background image file name from the first `0,` line of `[Events]` that
/// has a third field. An empty field there means no background.
///
/// Ex: `0,0,"bg.jpg",0,0` -> `bg.jpg`
pub fn background_image(text: &str) -> Option<String> {
    let field = section_lines(text, EVENTS)
        .filter(|line| line.starts_with("0,"))
        .find_map(|line| line.split(',').nth(2))?;
    let name = field.replace('"', "");
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Lines strictly inside the first `header` section, trimmed.
fn section_lines<'a>(text: &'a str, header: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    text.lines()
        .map(str::trim)
        .skip_while(move |line| *line != header)
        .skip(1)
        .take_while(|line| !is_section_header(line))
}

fn is_section_header(line: &str) -> bool {
    line.starts_with('[') && line.ends_with(']')
}

/// Case-insensitive `key` prefix match. Returns the rest of the line.
fn strip_key<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let head = line.get(..key.len())?;
    if head.eq_ignore_ascii_case(key) {
        Some(&line[key.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "osu file format v14\r\n\
        \r\n\
        [General]\r\n\
        AudioFilename: audio.mp3\r\n\
        AudioLeadIn: 0\r\n\
        \r\n\
        [Metadata]\r\n\
        Title:Foo\r\n\
        TitleUnicode:Fooo\r\n\
        Artist:Bar\r\n\
        Creator:Alice\r\n\
        Version:Hard\r\n\
        Tags:anime  rock\r\n\
        \r\n\
        [Events]\r\n\
        //Background and Video events\r\n\
        0,0,\"bg.jpg\",0,0\r\n\
        Video,0,\"clip.mp4\"\r\n";

    #[test]
    fn track_info_from_sample() {
        let info = track_info(SAMPLE).unwrap();
        assert_eq!(info.title, "Foo");
        assert_eq!(info.artist, "Bar");
        assert_eq!(info.audio_filename, "audio.mp3");
    }

    #[test]
    fn track_info_keys_are_case_insensitive_and_first_wins() {
        let text = "title: One \nARTIST:Two\ntitle:Later\naudiofilename:x.ogg\n";
        let info = track_info(text).unwrap();
        assert_eq!(info.title, "One");
        assert_eq!(info.artist, "Two");
        assert_eq!(info.audio_filename, "x.ogg");
    }

    #[test]
    fn track_info_missing_key_is_none() {
        assert!(track_info("Title:Foo\nArtist:Bar\n").is_none());
        assert!(track_info("").is_none());
    }

    #[test]
    fn unicode_title_key_does_not_count_as_title() {
        let text = "TitleUnicode:X\nArtist:A\nAudioFilename:a.mp3\n";
        assert!(track_info(text).is_none());
    }

    #[test]
    fn tags_split_on_whitespace() {
        assert_eq!(tags(SAMPLE), vec!["anime", "rock"]);
    }

    #[test]
    fn tags_outside_metadata_are_ignored() {
        let text = "[General]\nTags:nope\n[Metadata]\nTitle:x\n[Difficulty]\nTags:late\n";
        assert!(tags(text).is_empty());
    }

    #[test]
    fn creator_single_entry_or_empty() {
        assert_eq!(creators(SAMPLE), vec!["Alice"]);
        assert!(creators("[Metadata]\nCreator:   \n").is_empty());
        assert!(creators("Creator:Alice\n").is_empty());
    }

    #[test]
    fn background_from_events() {
        assert_eq!(background_image(SAMPLE).as_deref(), Some("bg.jpg"));
    }

    #[test]
    fn background_skips_short_lines() {
        let text = "[Events]\n0,0\n0,0,\"real.png\"\n";
        assert_eq!(background_image(text).as_deref(), Some("real.png"));
    }

    #[test]
    fn empty_background_field_ends_the_search() {
        let text = "[Events]\n0,0,\"\",0,0\n0,0,\"bg.jpg\",0,0\n";
        assert!(background_image(text).is_none());
    }

    #[test]
    fn background_outside_events_is_ignored() {
        let text = "[Events]\n//nothing\n[TimingPoints]\n0,0,\"bg.jpg\"\n";
        assert!(background_image(text).is_none());
    }
}
