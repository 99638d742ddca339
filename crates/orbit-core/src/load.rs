//! Directory load coordination.
//!
//! Every path change starts a new request through [`LoadCoordinator::begin`],
//! which hands out a [`LoadRequest`] ticket and moves the state to
//! [`LoadState::Loading`]. When the fetch finishes, the caller passes the
//! ticket back to [`LoadCoordinator::complete`]. The result is committed only
//! if the ticket still matches the in-flight request; anything else is a
//! superseded fetch and is dropped without touching state.

use crate::fs::entry::Entry;

/// Monotonic identifier of a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// Ticket for one directory fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    path: String,
    id: RequestId,
}

impl LoadRequest {
    /// The directory this request fetches.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn id(&self) -> RequestId {
        self.id
    }
}

/// Where the current directory listing stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    /// A fetch for `path` is in flight.
    Loading { path: String, request: RequestId },
    /// The listing for `path` arrived.
    Loaded { path: String, entries: Vec<Entry> },
    /// The fetch for `path` failed.
    Failed { path: String, reason: String },
}

impl LoadState {
    /// The path this state belongs to; `None` while idle.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Loading { path, .. } | Self::Loaded { path, .. } | Self::Failed { path, .. } => {
                Some(path.as_str())
            }
        }
    }
}

/// Owns the [`LoadState`]; nothing else writes it.
#[derive(Debug, Clone, Default)]
pub struct LoadCoordinator {
    state: LoadState,
    last_id: u64,
}

impl LoadCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request for `path` and marks it as the one of interest.
    ///
    /// Any earlier request becomes stale from this point on.
    pub fn begin(&mut self, path: &str) -> LoadRequest {
        self.last_id += 1;
        let id = RequestId(self.last_id);
        self.state = LoadState::Loading {
            path: path.to_string(),
            request: id,
        };
        LoadRequest {
            path: path.to_string(),
            id,
        }
    }

    /// Commits the outcome of `request` if it is still current.
    ///
    /// Returns `false` when the request was superseded; state is untouched.
    pub fn complete(&mut self, request: &LoadRequest, outcome: Result<Vec<Entry>, String>) -> bool {
        if !self.is_current(request) {
            tracing::debug!(
                "discarding stale listing for {} (request {:?})",
                request.path,
                request.id
            );
            return false;
        }
        let path = request.path.clone();
        self.state = match outcome {
            Ok(entries) => LoadState::Loaded { path, entries },
            Err(reason) => LoadState::Failed { path, reason },
        };
        true
    }

    /// Returns `true` if `request` is the in-flight request.
    pub fn is_current(&self, request: &LoadRequest) -> bool {
        matches!(
            &self.state,
            LoadState::Loading { path, request: id } if *id == request.id && *path == request.path
        )
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    /// The loaded listing, or an empty slice in any other state.
    pub fn entries(&self) -> &[Entry] {
        match &self.state {
            LoadState::Loaded { entries, .. } => entries.as_slice(),
            _ => &[],
        }
    }

    /// The failure reason, if the last request failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed { reason, .. } => Some(reason.as_str()),
            _ => None,
        }
    }
}
