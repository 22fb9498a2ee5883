//! The store: one state value, one reducer, and the effects it asks for.

use crate::StoreError;
use crate::handle::{EffectHandle, InFlight, Tracker};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use studio_quote_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{RwLock, broadcast};

const DEFAULT_BROADCAST_CAPACITY: usize = 16;
const SHUTDOWN_POLL: Duration = Duration::from_millis(20);

/// Runs a reducer over shared state and executes its effects.
///
/// Every write goes through [`Store::send`], which reduces under the write
/// lock. Concurrent sends are serialized in lock order.
///
/// Clones share the state, environment and effect bookkeeping.
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    closing: Arc<AtomicBool>,
    in_flight: Arc<AtomicUsize>,
    feedback: broadcast::Sender<A>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Store with the default feedback buffer (16 actions).
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_broadcast_capacity(initial_state, reducer, environment, DEFAULT_BROADCAST_CAPACITY)
    }

    /// Store whose feedback broadcast buffers `capacity` actions per observer.
    #[must_use]
    pub fn with_broadcast_capacity(
        initial_state: S,
        reducer: R,
        environment: E,
        capacity: usize,
    ) -> Self {
        let (feedback, _) = broadcast::channel(capacity.max(1));
        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            closing: Arc::new(AtomicBool::new(false)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            feedback,
        }
    }

    /// Reduce `action` and start the effects it returns.
    ///
    /// Returns once the state has been updated and the effects spawned.
    /// Use the [`EffectHandle`] to wait for them.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`Store::shutdown`].
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError>
    where
        R: Clone,
        E: Clone,
    {
        if self.closing.load(Ordering::Acquire) {
            tracing::warn!("Rejected action: store is shutting down");
            metrics::counter!("store.shutdown.rejected_actions").increment(1);
            return Err(StoreError::ShutdownInProgress);
        }
        metrics::counter!("store.commands.total").increment(1);

        let effects = {
            let mut state = self.state.write().await;
            let started = Instant::now();
            let effects = self.reducer.reduce(&mut state, action, &self.environment);
            metrics::histogram!("store.reducer.duration_seconds").record(started.elapsed().as_secs_f64());
            effects
        };
        tracing::trace!(effects = effects.len(), "Reduced action");

        let (handle, tracker) = EffectHandle::new();
        for effect in effects {
            self.run_effect(effect, &tracker);
        }
        Ok(handle)
    }

    /// Send `action`, then wait for a feedback action matching `predicate`.
    ///
    /// The subscription is taken before sending, so a fast effect cannot be
    /// missed. The returned action has already been reduced.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ShutdownInProgress`]: the store is shutting down
    /// - [`StoreError::Timeout`]: nothing matched within `timeout`
    /// - [`StoreError::ChannelClosed`]: the broadcast closed
    pub async fn send_and_wait_for<F>(
        &self,
        action: A,
        predicate: F,
        timeout: Duration,
    ) -> Result<A, StoreError>
    where
        R: Clone,
        E: Clone,
        F: Fn(&A) -> bool,
    {
        let mut observed = self.feedback.subscribe();
        self.send(action).await?;

        let wait = async {
            loop {
                match observed.recv().await {
                    Ok(action) if predicate(&action) => break Ok(action),
                    Ok(_) => {},
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Feedback observer lagged");
                    },
                    Err(broadcast::error::RecvError::Closed) => break Err(StoreError::ChannelClosed),
                }
            }
        };
        tokio::time::timeout(timeout, wait)
            .await
            .map_err(|_| StoreError::Timeout)?
    }

    /// Observe actions produced by effects, after they are reduced.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.feedback.subscribe()
    }

    /// Read from the current state.
    ///
    /// ```ignore
    /// let total = store.state(|s| s.total).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        f(&*self.state.read().await)
    }

    /// Refuse new actions and wait for running effects to finish.
    ///
    /// Feedback from effects that finish during shutdown is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] with the number of effects
    /// still running at the deadline.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!("Store shutting down");
        metrics::counter!("store.shutdown.initiated").increment(1);
        self.closing.store(true, Ordering::Release);

        let deadline = Instant::now() + timeout;
        loop {
            let running = self.in_flight.load(Ordering::Acquire);
            if running == 0 {
                tracing::info!("Store shut down cleanly");
                metrics::counter!("store.shutdown.completed").increment(1);
                return Ok(());
            }
            if Instant::now() >= deadline {
                tracing::error!(running, "Shutdown deadline passed with effects running");
                metrics::counter!("store.shutdown.timeout").increment(1);
                return Err(StoreError::ShutdownTimeout(running));
            }
            tokio::time::sleep(SHUTDOWN_POLL).await;
        }
    }

    /// Reduce an effect's action, then publish it to observers.
    async fn feed_back(&self, action: A)
    where
        R: Clone,
        E: Clone,
    {
        match self.send(action.clone()).await {
            Ok(_) => {
                let _ = self.feedback.send(action);
            },
            Err(error) => tracing::warn!(%error, "Dropped feedback action"),
        }
    }

    /// Spawn `work` as one tracked effect.
    fn spawn_tracked<F>(&self, tracker: &Tracker, work: impl FnOnce(Self) -> F)
    where
        R: Clone,
        E: Clone,
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let running = tracker.start();
        let in_flight = InFlight::enter(&self.in_flight);
        let task = work(self.clone());
        tokio::spawn(async move {
            let _in_flight = in_flight;
            let _running = running;
            task.await;
        });
    }

    fn run_effect(&self, effect: Effect<A>, tracker: &Tracker)
    where
        R: Clone,
        E: Clone,
    {
        match effect {
            Effect::None => {
                metrics::counter!("store.effects.executed", "type" => "none").increment(1);
            },
            Effect::Future(job) => {
                metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                self.spawn_tracked(tracker, |store| async move {
                    if let Some(action) = job.await {
                        store.feed_back(action).await;
                    }
                });
            },
            Effect::Delay { duration, action } => {
                metrics::counter!("store.effects.executed", "type" => "delay").increment(1);
                tracing::trace!(?duration, "Scheduling delayed action");
                self.spawn_tracked(tracker, |store| async move {
                    tokio::time::sleep(duration).await;
                    store.feed_back(*action).await;
                });
            },
            Effect::Parallel(effects) => {
                metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);
                for effect in effects {
                    self.run_effect(effect, tracker);
                }
            },
            Effect::Sequential(effects) => {
                metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);
                self.spawn_tracked(tracker, |store| async move {
                    for effect in effects {
                        let (step, mut done) = Tracker::detached();
                        store.run_effect(effect, &step);
                        while step.pending() > 0 {
                            if done.changed().await.is_err() {
                                break;
                            }
                        }
                    }
                });
            },
        }
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            closing: Arc::clone(&self.closing),
            in_flight: Arc::clone(&self.in_flight),
            feedback: self.feedback.clone(),
        }
    }
}
