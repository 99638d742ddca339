//! Filesystem data types shared across the state layer.
//!
//! The core never touches the filesystem itself; [`entry::Entry`] values
//! arrive from the [`Platform`](crate::platform::Platform) boundary.

pub mod entry;

pub use entry::{Entry, HIDDEN_MARKER};
