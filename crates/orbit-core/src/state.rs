//! The explorer state store.
//!
//! [`Explorer`] owns every piece of browser state: navigation history, the
//! directory load, view state, saved locations, and pending notices. It is
//! synchronous; async work is driven from outside by a
//! [`Session`](crate::session::Session), which passes results back in.
//!
//! Each navigation method returns the [`LoadRequest`] the caller must fetch,
//! or `None` when nothing changed.

use std::collections::VecDeque;
use std::path::Path;

use crate::fs::entry::Entry;
use crate::load::{LoadCoordinator, LoadRequest, LoadState};
use crate::nav::filter::{find_visible, visible_entries};
use crate::nav::history::History;
use crate::nav::locations::LocationStore;
use crate::view::ViewState;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// What activating (double-clicking) an entry asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A directory was entered; fetch this request.
    Navigate(LoadRequest),
    /// A file should be opened with the OS handler.
    Open(String),
    /// Nothing to do (e.g. the directory is already current).
    None,
}

#[derive(Debug, Clone, Default)]
pub struct Explorer {
    history: History,
    loader: LoadCoordinator,
    view: ViewState,
    locations: LocationStore,
    notices: VecDeque<Notice>,
    show_hidden: bool,
}

impl Explorer {
    pub fn new(view: ViewState, show_hidden: bool) -> Self {
        Self {
            view,
            show_hidden,
            ..Self::default()
        }
    }

    // --- navigation ---

    /// Navigates to `path`. `None` if it is already the current path.
    pub fn navigate(&mut self, path: &str) -> Option<LoadRequest> {
        let next = self.history.navigate(path)?;
        tracing::info!("navigate to {path}");
        self.history = next;
        self.path_changed()
    }

    pub fn go_back(&mut self) -> Option<LoadRequest> {
        self.history = self.history.go_back()?;
        self.path_changed()
    }

    pub fn go_forward(&mut self) -> Option<LoadRequest> {
        self.history = self.history.go_forward()?;
        self.path_changed()
    }

    /// Navigates to the parent of the current path, if there is one.
    pub fn go_up(&mut self) -> Option<LoadRequest> {
        let parent = Path::new(self.current_path()?)
            .parent()?
            .to_string_lossy()
            .into_owned();
        if parent.is_empty() {
            return None;
        }
        self.navigate(&parent)
    }

    /// Reloads the current path without touching history.
    pub fn refresh(&mut self) -> Option<LoadRequest> {
        self.path_changed()
    }

    /// Reloads the current path after it changed on disk.
    ///
    /// Unlike [`Explorer::refresh`] the selection survives, as long as the
    /// selected entry is still in the new listing.
    pub fn rescan(&mut self) -> Option<LoadRequest> {
        let path = self.history.current()?.to_string();
        Some(self.loader.begin(&path))
    }

    fn path_changed(&mut self) -> Option<LoadRequest> {
        self.view.reset_for_navigation();
        let path = self.history.current()?.to_string();
        Some(self.loader.begin(&path))
    }

    /// Applies a finished fetch. Returns `false` if it was superseded.
    pub fn finish_load(&mut self, request: &LoadRequest, outcome: Result<Vec<Entry>, String>) -> bool {
        if let Err(reason) = &outcome {
            if self.loader.is_current(request) {
                tracing::warn!("failed to load {}: {reason}", request.path());
            }
        }
        let committed = self.loader.complete(request, outcome);
        if committed {
            self.reconcile_selection();
        }
        committed
    }

    /// Points the selection at the fresh snapshot of the same path, or drops it.
    fn reconcile_selection(&mut self) {
        let Some(selected) = self.view.selected() else {
            return;
        };
        let fresh = self
            .loader
            .entries()
            .iter()
            .find(|e| e.path() == selected.path())
            .cloned();
        match fresh {
            Some(entry) => self.view.select(entry),
            None => self.view.reset_for_navigation(),
        }
    }

    /// Double-click semantics: enter directories, open everything else.
    pub fn activate(&mut self, entry: &Entry) -> Activation {
        if entry.is_dir() {
            return match self.navigate(entry.path()) {
                Some(request) => Activation::Navigate(request),
                None => Activation::None,
            };
        }
        Activation::Open(entry.path().to_string())
    }

    /// Records that opening `path` failed. History and load state stay as they are.
    pub fn open_failed(&mut self, path: &str, reason: &str) {
        tracing::warn!("failed to open {path}: {reason}");
        self.push_notice(Notice::error(format!("could not open {path}: {reason}")));
    }

    // --- derived reads ---

    pub fn current_path(&self) -> Option<&str> {
        self.history.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// The listing as displayed, re-derived on every call.
    pub fn visible_entries(&self) -> Vec<&Entry> {
        visible_entries(self.loader.entries(), self.show_hidden)
    }

    /// Finds a displayed entry by name.
    pub fn find_entry(&self, name: &str) -> Option<&Entry> {
        find_visible(self.loader.entries(), self.show_hidden, name)
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
    }

    // --- components ---

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn load_state(&self) -> &LoadState {
        self.loader.state()
    }

    pub fn loader(&self) -> &LoadCoordinator {
        &self.loader
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn locations(&self) -> &LocationStore {
        &self.locations
    }

    pub fn locations_mut(&mut self) -> &mut LocationStore {
        &mut self.locations
    }

    // --- notices ---

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// Drains pending notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}
