//! Single-shot debounce timer
//!
//! Commits a pending value only after a quiescence window with no further
//! input. Restarting cancels the pending commit; dropping the debouncer
//! cancels it too, so no stale commit can fire after teardown.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Schedule `commit` to run after the quiescence window, cancelling any
    /// previously scheduled commit. Must be called from within a tokio
    /// runtime.
    pub fn schedule<F>(&mut self, commit: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            sleep(window).await;
            commit.await;
        }));
    }

    /// Cancel the pending commit, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
