//! Presentation state that the listing UI reads.
//!
//! Plain key-value state. The only rule with teeth is that a selection
//! belongs to one listing: [`ViewState::reset_for_navigation`] drops it
//! together with the inspector whenever a new listing is requested.

use serde::{Deserialize, Serialize};

use crate::fs::entry::Entry;

pub const MIN_ITEM_SIZE: u32 = 32;
pub const MAX_ITEM_SIZE: u32 = 256;
pub const MAX_GAP: u32 = 32;

/// How entries are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    mode: ViewMode,
    item_size: u32,
    gap: u32,
    selected: Option<Entry>,
    inspector_open: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Grid,
            item_size: 80,
            gap: 4,
            selected: None,
            inspector_open: false,
        }
    }
}

impl ViewState {
    pub fn new(mode: ViewMode, item_size: u32, gap: u32) -> Self {
        let mut view = Self {
            mode,
            ..Self::default()
        };
        view.set_item_size(item_size);
        view.set_gap(gap);
        view
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn item_size(&self) -> u32 {
        self.item_size
    }

    /// Sets the item size, clamped to `MIN_ITEM_SIZE..=MAX_ITEM_SIZE`.
    pub fn set_item_size(&mut self, size: u32) {
        self.item_size = size.clamp(MIN_ITEM_SIZE, MAX_ITEM_SIZE);
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    /// Sets the gap between items, capped at `MAX_GAP`.
    pub fn set_gap(&mut self, gap: u32) {
        self.gap = gap.min(MAX_GAP);
    }

    pub fn selected(&self) -> Option<&Entry> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, entry: Entry) {
        self.selected = Some(entry);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn inspector_open(&self) -> bool {
        self.inspector_open
    }

    pub fn toggle_inspector(&mut self) {
        self.inspector_open = !self.inspector_open;
    }

    /// The entry the inspector panel should show, if it is open.
    pub fn inspected(&self) -> Option<&Entry> {
        if self.inspector_open {
            self.selected.as_ref()
        } else {
            None
        }
    }

    /// Drops selection and closes the inspector.
    pub fn reset_for_navigation(&mut self) {
        self.selected = None;
        self.inspector_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let view = ViewState::default();
        assert_eq!(view.mode(), ViewMode::Grid);
        assert_eq!(view.item_size(), 80);
        assert_eq!(view.gap(), 4);
        assert!(view.selected().is_none());
        assert!(!view.inspector_open());
    }

    #[test]
    fn sizes_are_clamped() {
        let mut view = ViewState::default();
        view.set_item_size(1);
        assert_eq!(view.item_size(), MIN_ITEM_SIZE);
        view.set_item_size(10_000);
        assert_eq!(view.item_size(), MAX_ITEM_SIZE);
        view.set_gap(99);
        assert_eq!(view.gap(), MAX_GAP);
    }

    #[test]
    fn new_clamps_inputs() {
        let view = ViewState::new(ViewMode::List, 0, 100);
        assert_eq!(view.mode(), ViewMode::List);
        assert_eq!(view.item_size(), MIN_ITEM_SIZE);
        assert_eq!(view.gap(), MAX_GAP);
    }

    #[test]
    fn inspector_shows_selection_only_when_open() {
        let mut view = ViewState::default();
        view.select(Entry::file("/a/b.txt", "b.txt"));
        assert!(view.inspected().is_none());
        view.toggle_inspector();
        assert_eq!(view.inspected().map(Entry::name), Some("b.txt"));
    }

    #[test]
    fn reset_for_navigation_clears_selection_and_inspector() {
        let mut view = ViewState::default();
        view.select(Entry::file("/a/b.txt", "b.txt"));
        view.toggle_inspector();
        view.set_mode(ViewMode::List);

        view.reset_for_navigation();
        assert!(view.selected().is_none());
        assert!(!view.inspector_open());
        assert_eq!(view.mode(), ViewMode::List, "layout survives navigation");
    }

    #[test]
    fn view_mode_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: ViewMode,
        }
        let w: Wrapper = toml::from_str("mode = \"list\"").unwrap();
        assert_eq!(w.mode, ViewMode::List);
    }
}
