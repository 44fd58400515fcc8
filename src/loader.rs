//! Cancellable one-shot deferred task.
//!
//! Drives the `Loading -> Ready` transition of a grid: the callback runs once
//! on a helper thread after the delay, unless the task was cancelled or
//! dropped first.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

/// Handle to a pending one-shot callback. Dropping the handle cancels it.
pub struct DeferredLoad {
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl DeferredLoad {
    /// Runs `on_fire` on a helper thread once `delay` has elapsed.
    pub fn spawn<F>(delay: Duration, on_fire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || match cancel_rx.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => on_fire(),
            // Cancelled explicitly, or the handle was dropped.
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                debug!("Deferred load cancelled");
            }
        });

        Self {
            cancel: Some(cancel_tx),
            handle: Some(handle),
        }
    }

    /// Cancels the callback if it has not fired yet and waits for the helper
    /// thread. Calling it again is a no-op.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            // The thread may have fired already and dropped the receiver.
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for DeferredLoad {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_delay() {
        let (tx, rx) = mpsc::channel();
        let task = DeferredLoad::spawn(Duration::from_millis(10), move || {
            let _ = tx.send("ready");
        });

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok("ready"));
        drop(task);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let (tx, rx) = mpsc::channel::<()>();
        let mut task = DeferredLoad::spawn(Duration::from_millis(200), move || {
            let _ = tx.send(());
        });

        task.cancel();
        assert!(task.is_finished());
        assert!(rx.recv_timeout(Duration::from_millis(400)).is_err());

        // Second cancel is harmless.
        task.cancel();
    }

    #[test]
    fn dropping_handle_cancels() {
        let (tx, rx) = mpsc::channel::<()>();
        let task = DeferredLoad::spawn(Duration::from_millis(200), move || {
            let _ = tx.send(());
        });
        drop(task);

        // The sender was dropped with the closure, without sending.
        assert_eq!(
            rx.recv_timeout(Duration::from_millis(400)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        );
    }
}
