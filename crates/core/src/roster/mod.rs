//! Roster CSV access.
//!
//! Reads the course, section-faculty, and zoom-link exports into plain
//! key-value mappings. No indexing or joining happens here; callers combine
//! the mappings however they need.

pub mod reader;
pub mod rows;

pub use reader::{Roster, RosterReader, UPPER_SCHOOL};
