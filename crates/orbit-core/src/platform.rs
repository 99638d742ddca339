//! Platform service boundary.
//!
//! The state layer never touches the filesystem or durable storage
//! directly. Frontends implement [`Platform`] and hand it to the
//! [`Session`](crate::session::Session), which calls it from background
//! tasks.

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::Entry;
use crate::nav::locations::CustomLocation;

/// Standard user folders shown in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownDir {
    Documents,
    Downloads,
    Movies,
}

impl WellKnownDir {
    /// Conventional folder name under the home directory.
    pub fn folder_name(self) -> &'static str {
        match self {
            Self::Documents => "Documents",
            Self::Downloads => "Downloads",
            Self::Movies => "Movies",
        }
    }

    /// Parses a case-insensitive folder name such as `"downloads"`.
    pub fn parse(name: &str) -> Option<Self> {
        [Self::Documents, Self::Downloads, Self::Movies]
            .into_iter()
            .find(|d| d.folder_name().eq_ignore_ascii_case(name))
    }
}

/// Services the state layer needs from the host.
///
/// Every call may fail; the state layer decides how each failure degrades.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Lists the entries of the directory at `path`.
    async fn list_directory(&self, path: &str) -> CoreResult<Vec<Entry>>;

    /// Resolves the user's home directory.
    async fn home_directory(&self) -> CoreResult<String>;

    /// Opens `path` with the OS default handler.
    async fn open_entry(&self, path: &str) -> CoreResult<()>;

    /// Reads the persisted custom locations.
    async fn load_locations(&self) -> CoreResult<Vec<CustomLocation>>;

    /// Replaces the persisted custom locations with `locations`.
    async fn save_locations(&self, locations: &[CustomLocation]) -> CoreResult<()>;

    /// Resolves a standard user folder. Unsupported unless overridden.
    async fn well_known_directory(&self, _dir: WellKnownDir) -> CoreResult<String> {
        Err(CoreError::Unsupported("well_known_directory"))
    }
}
