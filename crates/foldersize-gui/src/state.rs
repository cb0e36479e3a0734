/// Application state management.
///
/// Holds the single "current tree" slot and everything the widgets read.
/// A directory request runs on a background thread; its answer is picked up
/// in `process_messages()`, which runs once per frame. The tree is replaced
/// wholesale by every non-empty answer and never merged or edited.
use chrono::{DateTime, Local};
use foldersize_core::decoder::decode_tree;
use foldersize_core::model::FileSystemEntry;
use foldersize_core::render::{render_entries, ViewNode};
use foldersize_core::scanner::{start_getdir, GetdirHandle, ScanOptions};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Environment variable naming the folder the picker starts in.
pub const START_DIR_ENV: &str = "FOLDERSIZE_START_DIR";

/// The current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// No request in flight, possibly showing a previous tree.
    Idle,
    /// A `getdir` request is in flight.
    Waiting,
}

/// State of the folder-picker dialog.
#[derive(Debug, Clone, Default)]
pub struct FolderPicker {
    pub open: bool,
    /// Path typed or pre-filled in the dialog.
    pub path_input: String,
}

/// All application state.
pub struct AppState {
    pub phase: AppPhase,
    /// Decoded entries of the current tree.
    pub tree: Vec<FileSystemEntry>,
    /// Display tree rendered from `tree`.
    pub view: Vec<ViewNode>,
    pub pending: Option<GetdirHandle>,
    pub picker: FolderPicker,
    pub scan_options: ScanOptions,
    /// Folder the current tree was loaded from.
    pub source_path: Option<PathBuf>,
    pub loaded_at: Option<DateTime<Local>>,
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create the initial, empty state.
    pub fn new() -> Self {
        Self {
            phase: AppPhase::Idle,
            tree: Vec::new(),
            view: Vec::new(),
            pending: None,
            picker: FolderPicker::default(),
            scan_options: ScanOptions::default(),
            source_path: None,
            loaded_at: None,
            dark_mode: true,
        }
    }

    /// Show the folder picker, pre-filled with the start directory.
    pub fn open_picker(&mut self) {
        if self.picker.path_input.trim().is_empty() {
            self.picker.path_input = start_directory()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        self.picker.open = true;
    }

    /// Close the picker and request the typed folder.
    ///
    /// An empty input counts as a cancelled selection.
    pub fn confirm_picker(&mut self) {
        self.picker.open = false;
        let input = self.picker.path_input.trim();
        let selection = if input.is_empty() {
            None
        } else {
            Some(PathBuf::from(input))
        };
        self.request_directory(selection);
    }

    /// Close the picker without a selection.
    pub fn cancel_picker(&mut self) {
        self.picker.open = false;
        self.request_directory(None);
    }

    /// Start a `getdir` round trip for `selection` (`None` = cancelled).
    ///
    /// Returns `false` if the request was not started: only one request may
    /// be in flight at a time.
    pub fn request_directory(&mut self, selection: Option<PathBuf>) -> bool {
        if self.phase == AppPhase::Waiting {
            warn!("Directory request ignored: another request is still running");
            return false;
        }
        match start_getdir(selection, self.scan_options.clone()) {
            Ok(handle) => {
                self.pending = Some(handle);
                self.phase = AppPhase::Waiting;
                true
            }
            Err(e) => {
                error!("Could not start directory request: {e}");
                false
            }
        }
    }

    /// Poll the in-flight request. Called once per frame.
    ///
    /// Returns `true` if an answer arrived and the UI should repaint.
    pub fn process_messages(&mut self) -> bool {
        let answer = match self.pending.as_ref().and_then(GetdirHandle::try_response) {
            Some(answer) => answer,
            None => return false,
        };
        let selection = self.pending.take().and_then(|h| h.selection);
        self.phase = AppPhase::Idle;

        if self.apply_response(&answer) {
            self.source_path = selection;
        }
        true
    }

    /// Apply a `getdir` answer to the current tree slot.
    ///
    /// `""` is a cancellation: nothing changes. Anything else replaces the
    /// tree, so an undecodable answer leaves an empty view. Returns whether
    /// the tree was replaced.
    pub fn apply_response(&mut self, data: &str) -> bool {
        if data.is_empty() {
            info!("select canceled");
            return false;
        }
        let tree = decode_tree(data);
        for root in &tree {
            debug!("{root}");
        }
        self.view = render_entries(&tree);
        self.tree = tree;
        self.loaded_at = Some(Local::now());
        info!("Loaded tree with {} entries", self.entry_count());
        true
    }

    /// Sum of the sizes of the top-level entries, saturating at `u64::MAX`.
    pub fn total_size(&self) -> u64 {
        self.tree
            .iter()
            .map(FileSystemEntry::size)
            .fold(0, u64::saturating_add)
    }

    /// Number of entries in the whole current tree.
    pub fn entry_count(&self) -> usize {
        self.tree.iter().map(FileSystemEntry::node_count).sum()
    }
}

/// Folder the picker starts in: `$FOLDERSIZE_START_DIR`, else the current
/// working directory.
pub fn start_directory() -> Option<PathBuf> {
    std::env::var_os(START_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
}
