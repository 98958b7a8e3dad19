//! Store module — persisted entry list and file identity.
//!
//! This module provides:
//! - The `Entry` type and case-insensitive name comparison (`entry`)
//! - Deterministic store/key filenames from namespace entropy (`paths`)
//! - The CSV-backed `EntryStore` with atomic writes (`file`)

pub mod entry;
pub mod file;
pub mod paths;

// Re-export the most commonly used items.
pub use entry::Entry;
pub use file::EntryStore;
pub use paths::StorePaths;
