//! # Location History
//!
//! Remembers what the user chose at each depth so a page can pre-highlight
//! the entry that was selected the last time this path was visited.
//!
//! ```text
//! depth:    0       1        2             3
//! history: [<root>, Albums, "Abbey Road", "Come Together"]
//!                   │        │             └─ song played from the depth-2 page
//!                   │        └─ directory listed at depth 2
//!                   └─ directory listed at depth 1
//! ```
//!
//! The history is a single path, never a tree: choosing something different
//! at depth `d` discards everything recorded from `d` on before appending.
//! Root pages are not choices, so a root with nothing chosen below it
//! leaves no entry.

use log::debug;
use serde::Serialize;

use crate::media::Marker;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocationHistory {
    entries: Vec<Marker>,
}

impl LocationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `marker` as the choice made at `depth`.
    ///
    /// Re-recording the entry already at `depth` keeps the deeper entries,
    /// so retracing a known path still restores its highlights.
    ///
    /// A root at the end of the path is implied rather than stored; it is
    /// filled in once something is chosen below it.
    pub fn record(&mut self, depth: usize, marker: Marker) {
        if self.entries.get(depth) == Some(&marker) {
            return;
        }
        if self.entries.len() > depth {
            debug!(
                "History diverged at depth {}: dropping {} entries",
                depth,
                self.entries.len() - depth
            );
            self.entries.truncate(depth);
        }
        if marker == Marker::Root {
            return;
        }
        self.entries.resize(depth, Marker::Root);
        self.entries.push(marker);
    }

    /// What was chosen at `depth` last time, if the path goes that deep.
    pub fn get(&self, depth: usize) -> Option<&Marker> {
        self.entries.get(depth)
    }

    /// Hint for a page being pushed at `depth`: the choice recorded one
    /// level below it.
    pub fn hint_for(&self, depth: usize) -> Option<&Marker> {
        self.entries.get(depth + 1)
    }

    pub fn entries(&self) -> &[Marker] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaItem;

    fn item(id: &str) -> Marker {
        Marker::Item(MediaItem::new(id, id.to_uppercase()))
    }

    fn history_of(ids: &[&str]) -> LocationHistory {
        let mut history = LocationHistory::new();
        for (depth, id) in ids.iter().enumerate() {
            history.record(depth, item(id));
        }
        history
    }

    #[test]
    fn test_record_appends_at_end() {
        let history = history_of(&["x", "y"]);
        assert_eq!(history.entries(), &[item("x"), item("y")]);
    }

    #[test]
    fn test_same_choice_keeps_suffix() {
        let mut history = history_of(&["x", "y", "z"]);
        for _ in 0..3 {
            history.record(1, item("y"));
        }
        assert_eq!(history.entries(), &[item("x"), item("y"), item("z")]);
    }

    #[test]
    fn test_divergent_choice_drops_suffix() {
        let mut history = history_of(&["x", "y", "z"]);
        history.record(1, item("w"));
        assert_eq!(history.entries(), &[item("x"), item("w")]);
    }

    #[test]
    fn test_record_past_end_truncates_nothing() {
        let mut history = history_of(&["x"]);
        history.record(1, item("y"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_trailing_root_is_implied() {
        let mut history = LocationHistory::new();
        history.record(0, Marker::Root);
        assert!(history.is_empty());

        history.record(1, item("x"));
        assert_eq!(history.entries(), &[Marker::Root, item("x")]);

        history.record(0, Marker::Root);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_root_replacing_directory_drops_suffix() {
        let mut history = history_of(&["x", "y"]);
        history.record(0, Marker::Root);
        assert!(history.is_empty());
    }

    #[test]
    fn test_hint_for_looks_one_deeper() {
        let history = history_of(&["x", "y"]);
        assert_eq!(history.hint_for(0), Some(&item("y")));
        assert_eq!(history.hint_for(1), None);
        assert_eq!(history.get(0), Some(&item("x")));
    }

    #[test]
    fn test_clear() {
        let mut history = history_of(&["x", "y"]);
        history.clear();
        assert!(history.is_empty());
    }
}
