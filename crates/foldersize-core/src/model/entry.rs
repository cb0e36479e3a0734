/// A single file or directory in a decoded folder-size tree.
///
/// The tree is an owned, recursively nested structure: each directory holds
/// its children in the order the scanner produced them. Nothing is ever
/// re-sorted after construction.
///
/// The serde representation is externally tagged with the keys `FileItem` and
/// `DirectoryItem`, which is exactly the JSON wire shape exchanged between the
/// scanner and the view:
///
/// ```text
/// { "FileItem":      { "name": .., "fullpath": .., "size": .. } }
/// { "DirectoryItem": { "name": .., "fullpath": .., "size": .., "children": [..] } }
/// ```
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A file or a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileSystemEntry {
    #[serde(rename = "FileItem")]
    File(FileEntry),
    #[serde(rename = "DirectoryItem")]
    Directory(DirectoryEntry),
}

/// Leaf node: one file and its byte size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Display label (file name only).
    pub name: CompactString,
    /// Path identifying this entry within the scanned tree.
    pub fullpath: String,
    /// Size in bytes. Authoritative.
    pub size: u64,
}

/// Internal node: a directory, its aggregate size, and its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: CompactString,
    pub fullpath: String,
    /// Sum of all transitively contained file sizes.
    ///
    /// Filled in by the scanner via [`DirectoryEntry::calculate_size`]; a
    /// decoded tree carries whatever the payload said.
    pub size: u64,
    /// Child entries in payload order.
    pub children: Vec<FileSystemEntry>,
}

impl FileEntry {
    pub fn new(name: impl Into<CompactString>, fullpath: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            fullpath: fullpath.into(),
            size,
        }
    }
}

impl DirectoryEntry {
    /// Create an empty directory with size 0.
    pub fn new(name: impl Into<CompactString>, fullpath: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fullpath: fullpath.into(),
            size: 0,
            children: Vec::new(),
        }
    }

    /// Recompute `size` for this directory and every directory below it.
    ///
    /// Returns the new total for `self`. File sizes are taken as-is; totals
    /// saturate at `u64::MAX`.
    pub fn calculate_size(&mut self) -> u64 {
        let mut total: u64 = 0;
        for child in &mut self.children {
            total = total.saturating_add(match child {
                FileSystemEntry::File(file) => file.size,
                FileSystemEntry::Directory(dir) => dir.calculate_size(),
            });
        }
        self.size = total;
        total
    }
}

impl FileSystemEntry {
    /// Display label of the entry.
    pub fn name(&self) -> &str {
        match self {
            FileSystemEntry::File(file) => &file.name,
            FileSystemEntry::Directory(dir) => &dir.name,
        }
    }

    pub fn fullpath(&self) -> &str {
        match self {
            FileSystemEntry::File(file) => &file.fullpath,
            FileSystemEntry::Directory(dir) => &dir.fullpath,
        }
    }

    /// The size recorded on the entry.
    pub fn size(&self) -> u64 {
        match self {
            FileSystemEntry::File(file) => file.size,
            FileSystemEntry::Directory(dir) => dir.size,
        }
    }

    /// Sum of the file sizes contained in this entry, ignoring the `size`
    /// recorded on directories. Saturates at `u64::MAX`.
    pub fn computed_size(&self) -> u64 {
        match self {
            FileSystemEntry::File(file) => file.size,
            FileSystemEntry::Directory(dir) => dir
                .children
                .iter()
                .map(FileSystemEntry::computed_size)
                .fold(0, u64::saturating_add),
        }
    }

    #[inline]
    pub fn is_directory(&self) -> bool {
        matches!(self, FileSystemEntry::Directory(_))
    }

    /// Children of a directory; empty for files.
    pub fn children(&self) -> &[FileSystemEntry] {
        match self {
            FileSystemEntry::File(_) => &[],
            FileSystemEntry::Directory(dir) => &dir.children,
        }
    }

    /// Number of entries in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(FileSystemEntry::node_count)
            .sum::<usize>()
    }

    /// Depth-first search for the first directory called `name`.
    ///
    /// `self` is checked before its children.
    pub fn find_directory<'a>(&'a self, name: &str) -> Option<&'a FileSystemEntry> {
        match self {
            FileSystemEntry::Directory(dir) if dir.name == name => Some(self),
            FileSystemEntry::Directory(dir) => dir
                .children
                .iter()
                .find_map(|child| child.find_directory(name)),
            FileSystemEntry::File(_) => None,
        }
    }
}

impl From<FileEntry> for FileSystemEntry {
    fn from(file: FileEntry) -> Self {
        FileSystemEntry::File(file)
    }
}

impl From<DirectoryEntry> for FileSystemEntry {
    fn from(dir: DirectoryEntry) -> Self {
        FileSystemEntry::Directory(dir)
    }
}

/// One-line debug summary; used by log output.
impl fmt::Display for FileSystemEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemEntry::File(file) => {
                write!(f, "FileItem: {} , {} ", file.name, file.size)
            }
            FileSystemEntry::Directory(dir) => write!(
                f,
                "DirectoryItem: {} , {}, {}",
                dir.name,
                self.computed_size(),
                dir.children.len()
            ),
        }
    }
}
