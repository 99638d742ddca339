//! Navigation logic for Orbit.
//!
//! This module contains navigation [`history::History`], the saved
//! [`locations::LocationStore`], and read-time entry [`filter`]ing.

pub mod filter;
pub mod history;
pub mod locations;
