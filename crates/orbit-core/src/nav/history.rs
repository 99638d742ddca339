//! Navigation history with back/forward support.

/// Immutable, branching navigation history.
///
/// Every transition returns a **new** `History` instance, following the
/// project-wide immutability convention, or `None` when the transition is a
/// no-op. Visited paths live in a single list with a cursor; the current path
/// is whatever the cursor points at, so it cannot drift from the list.
/// Navigating after going back discards the forward branch, the same
/// semantics as a web browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    paths: Vec<String>,
    cursor: Option<usize>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit to `path`.
    ///
    /// Returns `None` if `path` is already the current path. The very first
    /// navigation always succeeds because there is nothing to compare with.
    pub fn navigate(&self, path: impl Into<String>) -> Option<Self> {
        let path = path.into();
        if self.current() == Some(path.as_str()) {
            return None;
        }
        let keep = self.cursor.map_or(0, |c| c + 1);
        let mut paths: Vec<String> = self.paths[..keep].to_vec();
        paths.push(path);
        let cursor = Some(paths.len() - 1);
        Some(Self { paths, cursor })
    }

    /// Steps back one entry, or `None` if already at the oldest.
    pub fn go_back(&self) -> Option<Self> {
        if !self.can_go_back() {
            return None;
        }
        Some(Self {
            paths: self.paths.clone(),
            cursor: self.cursor.map(|c| c - 1),
        })
    }

    /// Steps forward one entry, or `None` if already at the newest.
    pub fn go_forward(&self) -> Option<Self> {
        if !self.can_go_forward() {
            return None;
        }
        Some(Self {
            paths: self.paths.clone(),
            cursor: self.cursor.map(|c| c + 1),
        })
    }

    /// Returns the path under the cursor.
    pub fn current(&self) -> Option<&str> {
        self.cursor
            .and_then(|c| self.paths.get(c))
            .map(String::as_str)
    }

    /// Returns `true` if the cursor is past the first entry.
    pub fn can_go_back(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    /// Returns `true` if there are entries after the cursor.
    pub fn can_go_forward(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.paths.len())
    }

    /// Index of the current entry; `None` for an empty history.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// All recorded paths, oldest first.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(history: History, path: &str) -> History {
        history.navigate(path).unwrap()
    }

    #[test]
    fn new_history_is_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(history.current().is_none());
        assert!(history.cursor().is_none());
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn first_navigation_seeds_history() {
        let history = visit(History::new(), "/home");
        assert_eq!(history.current(), Some("/home"));
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.len(), 1);
        assert!(!history.can_go_back());
    }

    #[test]
    fn first_navigation_to_empty_string_is_not_suppressed() {
        let history = History::new().navigate("").unwrap();
        assert_eq!(history.current(), Some(""));
        assert!(history.navigate("").is_none());
    }

    #[test]
    fn navigate_to_current_is_noop() {
        let history = visit(visit(History::new(), "/a"), "/b");
        assert!(history.navigate("/b").is_none());
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn navigate_to_previous_path_is_new_visit() {
        let history = visit(visit(History::new(), "/a"), "/b");
        let history = visit(history, "/a");
        assert_eq!(history.paths(), ["/a", "/b", "/a"]);
    }

    #[test]
    fn navigate_does_not_mutate_original() {
        let history = visit(History::new(), "/home");
        let _next = history.navigate("/tmp");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some("/home"));
    }

    #[test]
    fn go_back_on_empty_returns_none() {
        assert!(History::new().go_back().is_none());
        assert!(History::new().go_forward().is_none());
    }

    #[test]
    fn go_back_at_oldest_returns_none() {
        let history = visit(History::new(), "/home");
        assert!(history.go_back().is_none());
    }

    #[test]
    fn back_then_forward_restores_current() {
        let history = visit(visit(visit(History::new(), "/a"), "/b"), "/c");
        let back = history.go_back().unwrap();
        assert_eq!(back.current(), Some("/b"));
        let forward = back.go_forward().unwrap();
        assert_eq!(forward.current(), Some("/c"));
        assert_eq!(forward, history);
    }

    #[test]
    fn go_forward_at_newest_returns_none() {
        let history = visit(visit(History::new(), "/a"), "/b");
        assert!(history.go_forward().is_none());
    }

    #[test]
    fn navigate_after_back_truncates_forward_branch() {
        let history = visit(visit(visit(History::new(), "/a"), "/b"), "/c");
        let history = history.go_back().unwrap();
        assert_eq!(history.current(), Some("/b"));

        let history = visit(history, "/d");
        assert_eq!(history.paths(), ["/a", "/b", "/d"]);
        assert_eq!(history.current(), Some("/d"));
        assert!(!history.can_go_forward());
        assert!(history.can_go_back());
    }

    #[test]
    fn navigate_to_forward_neighbour_still_truncates() {
        let history = visit(visit(History::new(), "/a"), "/b");
        let history = history.go_back().unwrap();
        let history = visit(history, "/b");
        assert_eq!(history.paths(), ["/a", "/b"]);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn can_go_back_tracks_cursor() {
        let mut history = History::new();
        for (i, path) in ["/1", "/2", "/3", "/4"].iter().enumerate() {
            history = visit(history, path);
            assert_eq!(history.can_go_back(), i > 0);
        }
        while let Some(prev) = history.go_back() {
            history = prev;
        }
        assert_eq!(history.cursor(), Some(0));
        assert!(!history.can_go_back());
        assert!(history.can_go_forward());
    }

    #[test]
    fn browsing_scenario() {
        let history = visit(History::new(), "/home");
        assert_eq!(history.current(), Some("/home"));
        assert!(!history.can_go_back());

        let history = visit(history, "/home/docs");
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());

        let history = history.go_back().unwrap();
        assert_eq!(history.current(), Some("/home"));
        assert!(history.can_go_forward());

        let history = visit(history, "/home/pics");
        assert!(!history.can_go_forward());
        assert_eq!(history.paths(), ["/home", "/home/pics"]);
    }

    #[test]
    fn clone_produces_independent_copy() {
        let history = visit(visit(History::new(), "/a"), "/b");
        let cloned = history.clone();
        let back = cloned.go_back().unwrap();
        assert_eq!(back.current(), Some("/a"));
        assert_eq!(history.current(), Some("/b"));
    }
}
