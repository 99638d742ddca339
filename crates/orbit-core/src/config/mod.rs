//! Configuration management for Orbit.
//!
//! User preferences ([`settings::Config`]) are stored as a TOML file and
//! loaded at startup.

pub mod settings;
