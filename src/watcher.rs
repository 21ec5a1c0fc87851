//! Filesystem watching for the compared roots
//!
//! Bursts of create/modify/remove events under either root are collapsed into
//! a single refresh callback once the roots have been quiet for the debounce
//! window.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::mpsc::{sync_channel, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio_util::sync::CancellationToken;

/// Quiet period before a burst of events triggers a refresh.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

pub struct CompareWatcher {
    roots: Vec<PathBuf>,
    _watcher: RecommendedWatcher,
    cancellation_token: CancellationToken,
    _debounce_thread_handle: Option<thread::JoinHandle<()>>,
}

impl CompareWatcher {
    pub fn start<F>(left: PathBuf, right: PathBuf, on_refresh: F) -> Result<Self>
    where
        F: Fn(Vec<PathBuf>) + Send + 'static,
    {
        Self::start_with_debounce(left, right, DEFAULT_DEBOUNCE, on_refresh)
    }

    pub fn start_with_debounce<F>(
        left: PathBuf,
        right: PathBuf,
        debounce: Duration,
        on_refresh: F,
    ) -> Result<Self>
    where
        F: Fn(Vec<PathBuf>) + Send + 'static,
    {
        let cancellation_token = CancellationToken::new();
        let token_clone = cancellation_token.clone();

        // bounded so a flood of events cannot grow memory
        let (tx, rx) = sync_channel::<Event>(100);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                if matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    // full channel: a refresh is already pending
                    let _ = tx.try_send(event);
                }
            }
        })?;

        let roots = vec![left, right];
        for root in &roots {
            watcher.watch(root, RecursiveMode::Recursive)?;
        }

        let thread_handle = thread::spawn(move || {
            let mut paths = HashSet::new();
            loop {
                if token_clone.is_cancelled() {
                    break;
                }

                let first_event = match rx.recv_timeout(debounce) {
                    Ok(e) => e,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                };
                paths.extend(first_event.paths);

                loop {
                    if token_clone.is_cancelled() {
                        return;
                    }

                    match rx.recv_timeout(debounce) {
                        Ok(event) => paths.extend(event.paths),
                        Err(RecvTimeoutError::Timeout) => {
                            if !paths.is_empty() {
                                on_refresh(paths.drain().collect());
                            }
                            break;
                        }
                        Err(RecvTimeoutError::Disconnected) => return,
                    }
                }
            }
        });

        Ok(Self {
            roots,
            _watcher: watcher,
            cancellation_token,
            _debounce_thread_handle: Some(thread_handle),
        })
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn is_running(&self) -> bool {
        !self.cancellation_token.is_cancelled()
    }

    pub fn stop(&mut self) {
        self.cancellation_token.cancel();
        // the thread exits on its own once it sees the token
        let _ = self._debounce_thread_handle.take();
    }
}

impl Drop for CompareWatcher {
    fn drop(&mut self) {
        // don't join here, just cancel
        self.cancellation_token.cancel();
    }
}
