/// Data model for decoded folder-size trees.
///
/// Re-exports the entry types and the byte formatting helpers.
pub mod entry;
pub mod size;

pub use entry::{DirectoryEntry, FileEntry, FileSystemEntry};
