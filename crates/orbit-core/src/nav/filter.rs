//! Read-time projections over a directory listing.
//!
//! Nothing here stores its result: callers re-derive the projection from
//! the current listing on every read, so a reload can never leave a stale
//! filtered view behind.

use crate::fs::entry::Entry;

/// Returns the entries that should be displayed.
///
/// Entries whose name starts with the hidden marker (`.`) are dropped unless
/// `show_hidden` is set. Order is preserved.
pub fn visible_entries(entries: &[Entry], show_hidden: bool) -> Vec<&Entry> {
    entries
        .iter()
        .filter(|e| show_hidden || !e.is_hidden())
        .collect()
}

/// Finds a displayed entry by exact name.
pub fn find_visible<'a>(entries: &'a [Entry], show_hidden: bool, name: &str) -> Option<&'a Entry> {
    entries
        .iter()
        .filter(|e| show_hidden || !e.is_hidden())
        .find(|e| e.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Vec<Entry> {
        vec![
            Entry::directory("/repo/.git", ".git"),
            Entry::file("/repo/readme.txt", "readme.txt"),
            Entry::directory("/repo/src", "src"),
        ]
    }

    fn names(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.name().to_string()).collect()
    }

    #[test]
    fn hides_dot_entries() {
        let entries = listing();
        let visible = visible_entries(&entries, false);
        assert_eq!(names(&visible), vec!["readme.txt", "src"]);
    }

    #[test]
    fn show_hidden_keeps_everything() {
        let entries = listing();
        let visible = visible_entries(&entries, true);
        assert_eq!(names(&visible), vec![".git", "readme.txt", "src"]);
    }

    #[test]
    fn empty_listing() {
        assert!(visible_entries(&[], false).is_empty());
    }

    #[test]
    fn only_hidden_entries() {
        let entries = vec![Entry::file("/p/.a", ".a"), Entry::file("/p/.b", ".b")];
        assert!(visible_entries(&entries, false).is_empty());
    }

    #[test]
    fn dot_in_middle_is_not_hidden() {
        let entries = vec![Entry::file("/p/archive.tar.gz", "archive.tar.gz")];
        assert_eq!(visible_entries(&entries, false).len(), 1);
    }

    #[test]
    fn rederived_after_reload() {
        let first = listing();
        assert_eq!(visible_entries(&first, false).len(), 2);

        let second = vec![
            Entry::file("/other/.env", ".env"),
            Entry::file("/other/main.rs", "main.rs"),
        ];
        assert_eq!(names(&visible_entries(&second, false)), vec!["main.rs"]);
    }

    #[test]
    fn find_visible_skips_hidden() {
        let entries = listing();
        assert!(find_visible(&entries, false, ".git").is_none());
        assert!(find_visible(&entries, true, ".git").is_some());
        assert_eq!(
            find_visible(&entries, false, "src").map(Entry::path),
            Some("/repo/src")
        );
    }
}
