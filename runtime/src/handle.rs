//! Completion tracking for the effects started by one `send`.

use crate::StoreError;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::watch;

/// Waits for the effects spawned by one action.
///
/// An effect counts as finished once any action it produced has itself been
/// reduced, so after [`EffectHandle::wait`] the state reflects the outcome.
///
/// ```ignore
/// let mut handle = store.send(QuotationAction::Submit).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// let status = store.state(|s| s.submission.clone()).await;
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    running: Arc<AtomicUsize>,
    done: watch::Receiver<()>,
}

impl EffectHandle {
    /// A handle plus the tracker the store threads through effect execution.
    pub(crate) fn new() -> (Self, Tracker) {
        let running = Arc::new(AtomicUsize::new(0));
        let (notify, done) = watch::channel(());
        let tracker = Tracker {
            running: Arc::clone(&running),
            notify,
        };
        (Self { running, done }, tracker)
    }

    /// A handle with nothing to wait for
    #[must_use]
    pub fn completed() -> Self {
        Self::new().0
    }

    /// Effects from this action still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    /// Wait until every effect has finished.
    pub async fn wait(&mut self) {
        while self.pending() > 0 {
            // All trackers dropped means nothing is left running
            if self.done.changed().await.is_err() {
                break;
            }
        }
    }

    /// [`EffectHandle::wait`] with a deadline.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if effects are still running at the deadline.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

/// Counts running effects for one handle and wakes it when the count hits zero.
#[derive(Clone)]
pub(crate) struct Tracker {
    running: Arc<AtomicUsize>,
    notify: watch::Sender<()>,
}

impl Tracker {
    /// Tracker for a nested group, independent of any handle.
    pub(crate) fn detached() -> (Self, watch::Receiver<()>) {
        let (notify, done) = watch::channel(());
        (
            Self {
                running: Arc::new(AtomicUsize::new(0)),
                notify,
            },
            done,
        )
    }

    /// Register a started effect; it is finished when the guard drops,
    /// including by unwinding.
    pub(crate) fn start(&self) -> Running {
        self.running.fetch_add(1, Ordering::SeqCst);
        Running(self.clone())
    }

    pub(crate) fn pending(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }
}

/// Drop guard for one running effect.
pub(crate) struct Running(Tracker);

impl Drop for Running {
    fn drop(&mut self) {
        if self.0.running.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.0.notify.send(());
        }
    }
}

/// Drop guard for the store-wide in-flight count used by shutdown.
pub(crate) struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    pub(crate) fn enter(count: &Arc<AtomicUsize>) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(count))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
