/// The `getdir` request: one selection in, one JSON string out.
///
/// An empty answer means "nothing selected" (the user cancelled the picker,
/// or the scan could not produce a tree). A non-empty answer is the JSON
/// document consumed by [`crate::decoder::decode_tree`].
use super::{scan_directory, to_json, ScanError, ScanOptions};
use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

/// Stack for the worker; serialising and dropping a deep tree recurse per
/// directory level.
const GETDIR_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Answer a directory selection with a JSON tree, or `""` on cancellation.
///
/// Scan and encode failures are logged and answered with `""`; the view has
/// no separate error state.
pub fn getdir(selection: Option<&Path>, options: &ScanOptions) -> String {
    let Some(path) = selection else {
        info!("Directory selection cancelled");
        return String::new();
    };

    let answer = scan_directory(path, options).and_then(|report| to_json(&report.root));
    match answer {
        Ok(json) => json,
        Err(e) => {
            error!("getdir failed for {}: {e}", path.display());
            String::new()
        }
    }
}

/// Handle to an in-flight `getdir` round trip.
pub struct GetdirHandle {
    response_rx: Receiver<String>,
    /// Path the request was made for; `None` for a cancelled selection.
    pub selection: Option<PathBuf>,
    _thread: thread::JoinHandle<()>,
}

impl GetdirHandle {
    /// Poll for the answer without blocking.
    ///
    /// A worker that died without answering is reported as `""`, so the
    /// caller never waits on a dead request.
    pub fn try_response(&self) -> Option<String> {
        match self.response_rx.try_recv() {
            Ok(answer) => Some(answer),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("getdir worker exited without answering");
                Some(String::new())
            }
        }
    }

    /// Block for the answer, up to `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<String> {
        match self.response_rx.recv_timeout(timeout) {
            Ok(answer) => Some(answer),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(String::new()),
        }
    }
}

/// Run [`getdir`] on a background thread.
pub fn start_getdir(
    selection: Option<PathBuf>,
    options: ScanOptions,
) -> Result<GetdirHandle, ScanError> {
    // One request, one answer.
    let (response_tx, response_rx) = crossbeam_channel::bounded::<String>(1);
    let worker_selection = selection.clone();

    let thread = thread::Builder::new()
        .name("foldersize-getdir".into())
        .stack_size(GETDIR_STACK_SIZE)
        .spawn(move || {
            let answer = getdir(worker_selection.as_deref(), &options);
            // The receiver is gone if the view was closed; nothing to do then.
            let _ = response_tx.send(answer);
        })
        .map_err(ScanError::Spawn)?;

    Ok(GetdirHandle {
        response_rx,
        selection,
        _thread: thread,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_selection_is_empty() {
        assert_eq!(getdir(None, &ScanOptions::default()), "");
    }

    #[test]
    fn test_unreadable_selection_is_empty() {
        let missing = Path::new("/definitely/not/here");
        assert_eq!(getdir(Some(missing), &ScanOptions::default()), "");
    }

    #[test]
    fn test_background_cancel_round_trip() {
        let handle = start_getdir(None, ScanOptions::default()).unwrap();
        assert!(handle.selection.is_none());
        assert_eq!(
            handle.recv_timeout(Duration::from_secs(30)).as_deref(),
            Some("")
        );
    }
}
