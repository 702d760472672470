//! Local storage
//!
//! Handles the local file of a copy or move.

pub mod filesystem;

pub use filesystem::{create_destination, ensure_source_file, open_source, remove_local_file};
