//! core/search.rs
//!
//! Free-text filter for the track list.
//!
//! A track matches when the query (case-folded) is a substring of its display
//! name, any tag, or any creator. Blank query = everything matches.

use rayon::prelude::*;

use super::types::{Catalog, TrackRecord};

pub fn matches(track: &TrackRecord, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    matches_folded(&track.name, &track.tags, &track.creators, &query.to_lowercase())
}

/// Filter `names` (an active playlist) down to matches, keeping order.
///
/// Names the catalog doesn't know (stale playlist entries) are matched on the
/// name alone.
pub fn search(catalog: &Catalog, names: &[String], query: &str) -> Vec<String> {
    if query.trim().is_empty() {
        return names.to_vec();
    }

    let needle = query.to_lowercase();
    names
        .par_iter()
        .filter(|name| match catalog.get(name) {
            Some(track) => matches_folded(&track.name, &track.tags, &track.creators, &needle),
            None => name.to_lowercase().contains(&needle),
        })
        .cloned()
        .collect()
}

fn matches_folded(name: &str, tags: &[String], creators: &[String], needle: &str) -> bool {
    name.to_lowercase().contains(needle)
        || tags.iter().any(|t| t.to_lowercase().contains(needle))
        || creators.iter().any(|c| c.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn track(name: &str, tags: &[&str], creators: &[&str]) -> TrackRecord {
        TrackRecord {
            name: name.to_string(),
            audio_path: PathBuf::from("audio.mp3"),
            package_dir: PathBuf::from("pkg"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            creators: creators.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn blank_query_matches_everything() {
        let t = track("Bar - Foo", &[], &[]);
        assert!(matches(&t, ""));
        assert!(matches(&t, "   "));
    }

    #[test]
    fn matches_name_tag_or_creator_case_insensitively() {
        let t = track("Bar - Foo", &["anime", "Rock"], &["Alice"]);
        assert!(matches(&t, "bar - f"));
        assert!(matches(&t, "ROCK"));
        assert!(matches(&t, "ali"));
        assert!(!matches(&t, "zzz"));
    }

    #[test]
    fn search_keeps_list_order() {
        let mut catalog = Catalog::new();
        catalog.insert(track("A - rock one", &[], &[]));
        catalog.insert(track("B - other", &["rock"], &[]));
        catalog.insert(track("C - none", &[], &[]));

        let list: Vec<String> = vec!["B - other".into(), "C - none".into(), "A - rock one".into()];
        assert_eq!(search(&catalog, &list, "Rock"), vec!["B - other", "A - rock one"]);
        assert_eq!(search(&catalog, &list, ""), list);
    }

    #[test]
    fn unknown_names_match_on_name_only() {
        let catalog = Catalog::new();
        let list: Vec<String> = vec!["Gone - Track".into()];
        assert_eq!(search(&catalog, &list, "gone"), vec!["Gone - Track"]);
        assert!(search(&catalog, &list, "rock").is_empty());
    }
}
