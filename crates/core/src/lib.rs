//! Roster CSV access, configuration, and shared error types for Campus.

pub mod config;
pub mod error;
pub mod roster;
