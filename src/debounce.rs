//! Cancellable quiet-period timer, used to debounce raw search input.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Debounces a stream of values: each [`schedule`](Debouncer::schedule)
/// cancels the previous pending commit and restarts the quiet-period
/// countdown, so only the last value before a quiet period is ever observed
/// on the receiver.
///
/// Pending timers are aborted, not merely ignored. A stale commit can never
/// fire after a newer `schedule`.
pub struct Debouncer<T> {
    delay: Duration,
    tx: Arc<watch::Sender<T>>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Clone + Send + Sync + 'static> Debouncer<T> {
    /// Create a debouncer seeded with `initial`. The receiver yields each
    /// value once its quiet period has elapsed.
    pub fn new(initial: T, delay: Duration) -> (Self, watch::Receiver<T>) {
        let (tx, rx) = watch::channel(initial);
        let debouncer = Self {
            delay,
            tx: Arc::new(tx),
            pending: None,
        };
        (debouncer, rx)
    }

    /// Buffer `value`; it commits after `delay` passes with no further
    /// calls. Must run inside a tokio runtime.
    pub fn schedule(&mut self, value: T) {
        self.cancel();

        let tx = Arc::clone(&self.tx);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(value);
        }));
    }

    /// Commit `value` immediately, cancelling any pending timer.
    pub fn commit_now(&mut self, value: T) {
        self.cancel();
        let _ = self.tx.send(value);
    }

    /// Drop any pending commit.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
