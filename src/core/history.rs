//! core/history.rs
//!
//! Play history with a cursor, like a browser's back/forward.
//!
//! - `record_play` = "the user started something new". Anything after the
//!   cursor (the redo tail) is thrown away, then the track is appended.
//! - `step_back` / `step_forward` only move the cursor.
//! - `jump_to` is for plays that come from outside linear navigation
//!   (favorites, a playlist click). If the track is already in history the
//!   cursor moves there and nothing is truncated.
//!
//! The cursor is `None` exactly when history is empty. Every other state has
//! `cursor < entries.len()`.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted data. An out-of-range cursor snaps to the last entry.
    pub fn restore(entries: Vec<String>, cursor: Option<usize>) -> Self {
        let cursor = match (entries.len(), cursor) {
            (0, _) => None,
            (len, Some(c)) if c < len => Some(c),
            (len, _) => Some(len - 1),
        };
        Self { entries, cursor }
    }

    /// A new track was played.
    ///
    /// Same name as the current entry: the redo tail is still dropped but no
    /// duplicate is appended.
    pub fn record_play(&mut self, name: &str) {
        if let Some(c) = self.cursor {
            self.entries.truncate(c + 1);
            if self.entries[c] == name {
                return;
            }
        }

        self.entries.push(name.to_string());
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Move to the most recent occurrence of `name`, or record it if unseen.
    pub fn jump_to(&mut self, name: &str) {
        match self.entries.iter().rposition(|e| e == name) {
            Some(i) => self.cursor = Some(i),
            None => self.record_play(name),
        }
    }

    pub fn step_back(&mut self) -> Option<&str> {
        let c = self.cursor.filter(|&c| c > 0)?;
        self.cursor = Some(c - 1);
        self.current()
    }

    pub fn step_forward(&mut self) -> Option<&str> {
        let c = self.cursor.filter(|&c| c + 1 < self.entries.len())?;
        self.cursor = Some(c + 1);
        self.current()
    }

    pub fn current(&self) -> Option<&str> {
        self.cursor.map(|c| self.entries[c].as_str())
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn has_next(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Chronological, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent first, each name once. This is what the "History" playlist shows.
    pub fn recent_unique(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.entries.len());
        for name in self.entries.iter().rev() {
            if !out.contains(name) {
                out.push(name.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played(names: &[&str]) -> History {
        let mut h = History::new();
        for n in names {
            h.record_play(n);
        }
        h
    }

    #[test]
    fn starts_empty() {
        let h = History::new();
        assert_eq!(h.cursor(), None);
        assert_eq!(h.current(), None);
        assert!(!h.has_previous());
        assert!(!h.has_next());
    }

    #[test]
    fn back_back_then_new_play_drops_redo_tail() {
        let mut h = played(&["a", "b", "c"]);
        assert_eq!(h.cursor(), Some(2));

        assert_eq!(h.step_back(), Some("b"));
        assert_eq!(h.step_back(), Some("a"));
        h.record_play("x");

        assert_eq!(h.entries(), &["a".to_string(), "x".to_string()]);
        assert_eq!(h.current(), Some("x"));
        assert_eq!(h.cursor(), Some(1));
        assert!(!h.has_next());
    }

    #[test]
    fn step_back_at_start_is_noop() {
        let mut h = played(&["a"]);
        assert_eq!(h.step_back(), None);
        assert_eq!(h.cursor(), Some(0));
    }

    #[test]
    fn step_forward_at_end_is_noop() {
        let mut h = played(&["a", "b"]);
        assert_eq!(h.step_forward(), None);
        assert_eq!(h.cursor(), Some(1));

        h.step_back();
        assert_eq!(h.step_forward(), Some("b"));
    }

    #[test]
    fn steps_on_empty_history_return_none() {
        let mut h = History::new();
        assert_eq!(h.step_back(), None);
        assert_eq!(h.step_forward(), None);
    }

    #[test]
    fn replaying_current_does_not_duplicate() {
        let mut h = played(&["a", "b", "c"]);
        h.step_back();
        h.record_play("b");

        assert_eq!(h.entries(), &["a".to_string(), "b".to_string()]);
        assert_eq!(h.current(), Some("b"));
    }

    #[test]
    fn jump_to_existing_keeps_sequence() {
        let mut h = played(&["a", "b", "c"]);
        h.jump_to("a");

        assert_eq!(h.len(), 3);
        assert_eq!(h.current(), Some("a"));
        assert!(h.has_next());
    }

    #[test]
    fn jump_to_unknown_records() {
        let mut h = played(&["a", "b"]);
        h.step_back();
        h.jump_to("z");

        assert_eq!(h.entries(), &["a".to_string(), "z".to_string()]);
        assert_eq!(h.current(), Some("z"));
    }

    #[test]
    fn jump_to_picks_most_recent_occurrence() {
        let mut h = played(&["a", "b", "a", "c"]);
        h.jump_to("a");
        assert_eq!(h.cursor(), Some(2));
    }

    #[test]
    fn restore_snaps_bad_cursor() {
        let h = History::restore(vec!["a".into(), "b".into()], Some(9));
        assert_eq!(h.cursor(), Some(1));

        let h = History::restore(Vec::new(), Some(0));
        assert_eq!(h.cursor(), None);
    }

    #[test]
    fn recent_unique_is_newest_first() {
        let h = played(&["a", "b", "a", "c"]);
        assert_eq!(h.recent_unique(), vec!["c", "a", "b"]);
    }
}
