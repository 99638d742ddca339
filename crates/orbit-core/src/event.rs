//! Event system for communication between UI and Core.
//!
//! The UI translates user input into [`Command`]s, which the
//! [`Session`](crate::session::Session) processes and answers with
//! [`Event`]s. This decoupling allows any frontend to drive the same core
//! logic.

use crate::nav::locations::CustomLocation;
use crate::platform::WellKnownDir;
use crate::state::Notice;
use crate::view::ViewMode;

/// An action the UI requests the core to perform.
///
/// Commands flow **UI → Core**. The core never creates commands itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Navigate to the directory at the given path.
    Navigate(String),
    /// Navigate to the user's home directory.
    GoHome,
    /// Navigate to a standard user folder.
    GoToWellKnown(WellKnownDir),
    /// Move to the parent directory.
    GoUp,
    /// Navigate backward in history.
    GoBack,
    /// Navigate forward in history.
    GoForward,
    /// Re-read the current directory.
    Refresh,
    /// Re-read the current directory after a change on disk, keeping the selection.
    Rescan,
    /// Select the displayed entry with this name.
    Select(String),
    /// Double-click the displayed entry with this name.
    Activate(String),
    /// Show or hide the inspector panel.
    ToggleInspector,
    /// Toggle visibility of hidden (dot-prefixed) entries.
    ToggleHidden,
    /// Switch between grid and list layout.
    SetViewMode(ViewMode),
    /// Change the item size.
    SetItemSize(u32),
    /// Change the gap between items.
    SetGap(u32),
    /// Save a new shortcut location.
    AddLocation(CustomLocation),
    /// Delete the shortcut location with this path.
    RemoveLocation(String),
}

/// A notification the core sends back to the UI.
///
/// Events flow **Core → UI**. The UI uses these to decide what to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A fetch for `path` started; the listing is now empty.
    Loading { path: String },
    /// The listing for the current path arrived.
    DirectoryLoaded { path: String, count: usize },
    /// The fetch for the current path failed.
    LoadFailed { path: String, reason: String },
    /// Selection, inspector, or layout changed.
    ViewChanged,
    /// The saved locations changed (optimistic write, load, or rollback).
    LocationsChanged,
    /// Something the user should be told about.
    Notice(Notice),
}
