//! Saved shortcut locations.
//!
//! A [`CustomLocation`] maps a human-readable label to a directory path.
//! The [`LocationStore`] keeps the in-memory list unique by path and syncs
//! it to the platform with optimistic writes: a change is shown right away
//! and rolled back if it could not be saved.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::optimistic::{Optimistic, PendingWrite, Settled};

/// A user-defined sidebar shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLocation {
    pub path: String,
    pub label: String,
}

impl CustomLocation {
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }

    /// Builds a location labelled with the last path component.
    ///
    /// Falls back to the whole path when it has no final component (e.g. `/`).
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let label = std::path::Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        Self { path, label }
    }
}

/// A pending persistence of the whole location list.
pub type LocationWrite = PendingWrite<Vec<CustomLocation>>;

/// In-memory mirror of the persisted locations.
#[derive(Debug, Clone, Default)]
pub struct LocationStore {
    locations: Optimistic<Vec<CustomLocation>>,
    initialized: bool,
}

impl LocationStore {
    /// Create an empty, uninitialized store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts the result of the one-time startup load.
    ///
    /// A failed load leaves the store empty. Returns `false` (and changes
    /// nothing) if the store was already initialized, or if a user write was
    /// applied before the load finished.
    pub fn apply_loaded(&mut self, loaded: CoreResult<Vec<CustomLocation>>) -> bool {
        if self.initialized {
            tracing::debug!("ignoring repeated location load");
            return false;
        }
        self.initialized = true;

        if self.locations.has_writes() {
            tracing::warn!("saved locations arrived after a local change, keeping local list");
            return false;
        }

        let loaded = match loaded {
            Ok(list) => dedup_by_path(list),
            Err(e) => {
                tracing::warn!("failed to load saved locations: {e}");
                Vec::new()
            }
        };
        self.locations.reset(loaded);
        true
    }

    /// Adds `location` in memory and returns the write to persist.
    ///
    /// Returns `None` if a location with the same path already exists.
    pub fn begin_add(&mut self, location: CustomLocation) -> Option<LocationWrite> {
        if self.contains(&location.path) {
            tracing::warn!("location already exists: {}", location.path);
            return None;
        }
        let mut next = self.locations.get().clone();
        next.push(location);
        Some(self.locations.apply(next))
    }

    /// Removes the location at `path` in memory and returns the write to persist.
    ///
    /// Returns `None` if no location has that path.
    pub fn begin_remove(&mut self, path: &str) -> Option<LocationWrite> {
        if !self.contains(path) {
            return None;
        }
        let next: Vec<CustomLocation> = self
            .locations
            .get()
            .iter()
            .filter(|l| l.path != path)
            .cloned()
            .collect();
        Some(self.locations.apply(next))
    }

    /// Records the persistence outcome of a write started by this store.
    pub fn settle(&mut self, write: LocationWrite, outcome: CoreResult<()>) -> Settled {
        if let Err(e) = &outcome {
            tracing::warn!("failed to save locations: {e}");
        }
        self.locations.settle(write, outcome)
    }

    /// Look up a location by path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&CustomLocation> {
        self.locations.get().iter().find(|l| l.path == path)
    }

    /// Returns `true` if a location with the given path exists.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Iterate over the locations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CustomLocation> {
        self.locations.get().iter()
    }

    /// The locations as currently shown.
    #[must_use]
    pub fn as_slice(&self) -> &[CustomLocation] {
        self.locations.get()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.get().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.get().is_empty()
    }

    /// Whether the startup load has been applied.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

fn dedup_by_path(list: Vec<CustomLocation>) -> Vec<CustomLocation> {
    let mut out: Vec<CustomLocation> = Vec::with_capacity(list.len());
    for location in list {
        if out.iter().any(|l| l.path == location.path) {
            tracing::warn!("dropping duplicate saved location: {}", location.path);
            continue;
        }
        out.push(location);
    }
    out
}
