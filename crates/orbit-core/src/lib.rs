//! Orbit core library: UI-agnostic state for a file browser.
//!
//! `orbit-core` owns navigation history, directory loading, view settings
//! and saved locations. It never touches the filesystem; frontends supply a
//! [`Platform`] implementation and drive a [`Session`] with [`Command`]s.
//!
//! # Modules
//!
//! - [`fs`]: the [`Entry`] type produced by directory listings.
//! - [`nav`]: navigation [`History`], saved locations, and visibility filtering.
//! - [`load`]: the directory-load state machine and its request tickets.
//! - [`view`]: layout, selection and inspector state.
//! - [`optimistic`]: optimistic values with rollback on failed persistence.
//! - [`state`]: the [`Explorer`] store that ties the above together.
//! - [`session`]: async driver that runs platform calls in background tasks.
//! - [`platform`]: the [`Platform`] boundary trait.
//! - [`config`]: TOML settings.
//! - [`event`]: [`Command`] and [`Event`] types for UI and core communication.
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod load;
pub mod nav;
pub mod optimistic;
pub mod platform;
pub mod session;
pub mod state;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::settings::Config;
pub use error::{CoreError, CoreResult};
pub use event::{Command, Event};
pub use fs::entry::Entry;
pub use load::{LoadCoordinator, LoadRequest, LoadState, RequestId};
pub use nav::history::History;
pub use nav::locations::{CustomLocation, LocationStore};
pub use optimistic::{Optimistic, PendingWrite, Settled};
pub use platform::{Platform, WellKnownDir};
pub use session::{Message, Session};
pub use state::{Activation, Explorer, Notice, NoticeLevel};
pub use view::{ViewMode, ViewState};
