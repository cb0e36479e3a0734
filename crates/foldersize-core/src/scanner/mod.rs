/// Scanner module: builds the nested size tree behind a `getdir` request.
///
/// The walk uses `jwalk` in sorted, depth-first mode. Entries arrive parent
/// first, so the tree is assembled with a stack of open directories: when
/// an entry at depth `d` arrives, every open directory deeper than `d - 1`
/// is complete and is attached to its parent.
///
/// Directory sizes are not known during the walk; a single bottom-up
/// [`DirectoryEntry::calculate_size`] pass fills them once the tree is
/// complete.
pub mod request;

use crate::model::{DirectoryEntry, FileEntry};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

pub use request::{getdir, start_getdir, GetdirHandle};

/// Errors that stop a scan (per-entry failures only count towards
/// [`ScanReport::error_count`]).
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode tree as JSON: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to spawn getdir thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Walk settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Follow symbolic links. Off by default so a link cycle cannot recurse
    /// forever and linked content is not counted twice.
    pub follow_links: bool,
    /// Skip dot-files and dot-directories.
    pub skip_hidden: bool,
    /// Directory-reading threads. `1` walks on the calling thread.
    pub threads: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            follow_links: false,
            skip_hidden: false,
            threads: num_cpus::get(),
        }
    }
}

/// Result of a completed scan.
#[derive(Debug)]
pub struct ScanReport {
    /// The scanned root with every directory size filled in.
    pub root: DirectoryEntry,
    pub files: u64,
    /// Directories found below the root (the root itself is not counted).
    pub directories: u64,
    /// Entries that could not be read and were skipped or recorded as empty.
    pub error_count: u64,
    pub duration: Duration,
}

/// Scan `root` into a nested tree.
///
/// The root entry's `name` and `fullpath` are both the path as given.
/// Regular files and directories are recorded; other entry types
/// (symlinks when not followed, sockets, devices) are skipped.
pub fn scan_directory(root: &Path, options: &ScanOptions) -> Result<ScanReport, ScanError> {
    let meta = std::fs::metadata(root).map_err(|source| ScanError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let start = Instant::now();
    info!("Starting scan of {}", root.display());

    let root_label = root.to_string_lossy();
    let mut tree = DirectoryEntry::new(&*root_label, &*root_label);
    // open[i] is the directory currently being filled at depth i + 1.
    let mut open: Vec<DirectoryEntry> = Vec::new();

    let mut files: u64 = 0;
    let mut directories: u64 = 0;
    let mut error_count: u64 = 0;

    let parallelism = if options.threads <= 1 {
        jwalk::Parallelism::Serial
    } else {
        jwalk::Parallelism::RayonNewPool(options.threads)
    };
    let walker = jwalk::WalkDir::new(root)
        .sort(true)
        .skip_hidden(options.skip_hidden)
        .follow_links(options.follow_links)
        .parallelism(parallelism);

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // Typically access denied while reading a directory.
                error_count += 1;
                let err_path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                warn!("Skipping {err_path}: {err}");
                continue;
            }
        };

        // The root itself is already in place.
        if entry.depth == 0 {
            continue;
        }

        close_until(&mut tree, &mut open, entry.depth - 1);

        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        let file_type = entry.file_type();

        if file_type.is_dir() {
            open.push(DirectoryEntry::new(&*name, path.display().to_string()));
            directories += 1;
        } else if file_type.is_file() {
            let size = match std::fs::symlink_metadata(&path) {
                Ok(meta) => meta.len(),
                Err(err) => {
                    error_count += 1;
                    warn!("Cannot stat {}: {err}", path.display());
                    0
                }
            };
            parent_of(&mut tree, &mut open)
                .children
                .push(FileEntry::new(&*name, path.display().to_string(), size).into());
            files += 1;
        } else {
            debug!("Ignoring non-regular entry {}", path.display());
        }
    }

    close_until(&mut tree, &mut open, 0);
    let total = tree.calculate_size();

    let duration = start.elapsed();
    info!(
        "Scan of {} complete: {files} files, {directories} dirs, {total} bytes, {error_count} errors in {duration:?}",
        root.display()
    );

    Ok(ScanReport {
        root: tree,
        files,
        directories,
        error_count,
        duration,
    })
}

/// Serialise a scanned root as pretty JSON.
///
/// The directory is written bare (its fields only, no `DirectoryItem`
/// wrapper); children are tagged items.
pub fn to_json(root: &DirectoryEntry) -> Result<String, ScanError> {
    serde_json::to_string_pretty(root).map_err(ScanError::Encode)
}

/// Attach completed directories to their parents until only `keep` remain open.
fn close_until(root: &mut DirectoryEntry, open: &mut Vec<DirectoryEntry>, keep: usize) {
    while open.len() > keep {
        if let Some(done) = open.pop() {
            parent_of(root, open).children.push(done.into());
        }
    }
}

/// The innermost open directory, or the root when none is open.
fn parent_of<'a>(
    root: &'a mut DirectoryEntry,
    open: &'a mut [DirectoryEntry],
) -> &'a mut DirectoryEntry {
    match open.last_mut() {
        Some(dir) => dir,
        None => root,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_until_attaches_in_order() {
        let mut root = DirectoryEntry::new("r", "r");
        let mut open = vec![DirectoryEntry::new("a", "r/a"), DirectoryEntry::new("b", "r/a/b")];

        close_until(&mut root, &mut open, 1);
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].children.len(), 1);
        assert_eq!(open[0].children[0].name(), "b");

        close_until(&mut root, &mut open, 0);
        assert!(open.is_empty());
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].node_count(), 2);
    }

    #[test]
    fn test_default_options() {
        let options = ScanOptions::default();
        assert!(!options.follow_links);
        assert!(!options.skip_hidden);
        assert!(options.threads >= 1);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let err = scan_directory(Path::new("/definitely/not/here"), &ScanOptions::default())
            .unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
    }
}
