//! # Petshop Runtime
//!
//! The [`Store`] that owns the storefront state and runs effects.
//!
//! A store reduces one action at a time under a write lock, spawns a tokio
//! task per asynchronous effect, and feeds every produced action back into
//! the reducer. Produced actions are also broadcast so observers can wait
//! for a particular completion. [`Store::shutdown`] stops accepting actions
//! and drains in-flight effects; their late outputs are dropped.
//!
//! ```ignore
//! use petshop_runtime::{Store, StoreConfig};
//!
//! let config = StoreConfig::default();
//! let store = Store::with_config(AppState::default(), AppReducer::new(), env, config);
//!
//! let mut handle = store.send(AppAction::Brands(BrandsAction::Fetch(query))).await?;
//! handle.wait().await;
//!
//! let count = store.state(|s| s.brands.brands.value().len()).await;
//! store.shutdown(Duration::from_secs(5)).await?;
//! ```

use petshop_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, watch};

/// Runtime errors
pub mod error {
    use thiserror::Error;

    /// Failures reported by [`Store`](crate::Store) operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// `send` after [`Store::shutdown`](crate::Store::shutdown) began
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Effects still running when the shutdown timeout elapsed
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// No matching action arrived in time
        #[error("Timeout waiting for action")]
        Timeout,

        /// The action broadcast has no sender left
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Store settings
///
/// ```
/// use petshop_runtime::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(64)
///     .with_shutdown_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.broadcast_capacity, 64);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Produced actions buffered per observer before it lags
    pub broadcast_capacity: usize,
    /// Shutdown timeout used by callers that have no better value
    pub default_shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Configuration with explicit values
    #[must_use]
    pub const fn new(broadcast_capacity: usize, default_shutdown_timeout: Duration) -> Self {
        Self {
            broadcast_capacity,
            default_shutdown_timeout,
        }
    }

    /// Override the broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Override the shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.default_shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(16, Duration::from_secs(30))
    }
}

/// Completion handle for the effects started by one [`Store::send`]
///
/// An effect counts as done once the action it produced has been reduced
/// and that action's own effects are done. Waiting on the handle after a
/// fetch therefore returns once the completion has been committed or
/// discarded as stale.
///
/// ```ignore
/// let mut handle = store.send(AppAction::Reviews(ReviewsAction::Fetch)).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    running: Arc<AtomicUsize>,
    done: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let running = Arc::new(AtomicUsize::new(0));
        let (notify, done) = watch::channel(());

        let tracking = EffectTracking {
            running: Arc::clone(&running),
            notify: Arc::new(notify),
        };
        (Self { running, done }, tracking)
    }

    /// A handle with nothing to wait for
    #[must_use]
    pub fn completed() -> Self {
        let (handle, _tracking) = Self::new();
        handle
    }

    /// Effects of this send still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    /// Wait until every effect of this send is done
    pub async fn wait(&mut self) {
        while self.pending() > 0 {
            if self.done.changed().await.is_err() {
                break;
            }
        }
    }

    /// [`EffectHandle::wait`] bounded by `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if effects are still running when the
    /// timeout expires.
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

/// Counter shared by a handle and the tasks running its effects
#[derive(Clone)]
struct EffectTracking {
    running: Arc<AtomicUsize>,
    notify: Arc<watch::Sender<()>>,
}

impl EffectTracking {
    /// Count one more running effect; dropping the guard uncounts it
    fn start(&self) -> RunningGuard {
        self.running.fetch_add(1, Ordering::SeqCst);
        RunningGuard(self.clone())
    }
}

/// Uncounts an effect when its task ends, including by panic
struct RunningGuard(EffectTracking);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        if self.0.running.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.0.notify.send(());
        }
    }
}

/// Store-wide in-flight counter used by shutdown
struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The store and its effect executor
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicUsize, Duration, Effect, EffectHandle, EffectTracking,
        InFlightGuard, Ordering, Reducer, RwLock, StoreConfig, StoreError,
    };
    use std::future::Future;
    use tokio::sync::broadcast;

    /// Owner of the application state
    ///
    /// State sits behind an `RwLock`; the reducer runs with the write lock
    /// held, so each action is applied atomically. Clones share state,
    /// counters and the broadcast, which lets spawned effect tasks feed
    /// actions back into the same store.
    ///
    /// - `S`: state
    /// - `A`: action
    /// - `E`: environment
    /// - `R`: reducer
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        shutdown: Arc<AtomicBool>,
        in_flight: Arc<AtomicUsize>,
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Store with [`StoreConfig::default`]
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Store with explicit settings
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                config,
                shutdown: Arc::new(AtomicBool::new(false)),
                in_flight: Arc::new(AtomicUsize::new(0)),
                action_broadcast,
            }
        }

        /// Settings the store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Effects currently running, across all handles
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.in_flight.load(Ordering::Acquire)
        }

        /// Whether [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Stop accepting actions and wait for running effects
        ///
        /// Effects that finish after this call still run to completion, but
        /// the actions they produce are rejected, so state no longer changes.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if effects are still
        /// running after `timeout`.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);
            self.shutdown.store(true, Ordering::Release);

            let deadline = tokio::time::Instant::now() + timeout;
            loop {
                let pending = self.pending_effects();
                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    metrics::counter!("store.shutdown.completed").increment(1);
                    return Ok(());
                }
                if tokio::time::Instant::now() >= deadline {
                    tracing::error!(pending_effects = pending, "Shutdown timed out");
                    metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }
                tracing::debug!(pending_effects = pending, "Waiting for effects to complete");
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        }

        /// Reduce `action` and start the effects it returns
        ///
        /// Concurrent sends serialize on the state lock. Effects run on
        /// their own tasks and may finish in any order.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] once shutdown began.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError>
        where
            R: Clone,
            E: Clone,
        {
            if self.is_shutting_down() {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }
            metrics::counter!("store.commands.total").increment(1);

            let (handle, tracking) = EffectHandle::new();
            let effects = {
                let mut state = self.state.write().await;
                let _span = tracing::debug_span!("reducer_execution").entered();

                let started = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(started.elapsed().as_secs_f64());
                tracing::trace!(effects = effects.len(), "Reducer finished");
                effects
            };

            for effect in effects {
                self.execute(effect, &tracking);
            }
            Ok(handle)
        }

        /// Send `action` and return the first produced action matching
        /// `predicate`
        ///
        /// The subscription is taken before sending, so a completion that
        /// arrives immediately is not missed.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] once shutdown began
        /// - [`StoreError::Timeout`] if nothing matched in time
        /// - [`StoreError::ChannelClosed`] if the broadcast closed
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
            let mut observed = self.action_broadcast.subscribe();
            self.send(action).await?;

            let matching = async {
                loop {
                    match observed.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            };
            tokio::time::timeout(timeout, matching)
                .await
                .map_err(|_| StoreError::Timeout)?
        }

        /// Observe every action produced by an effect
        ///
        /// Actions passed to [`Store::send`] directly are not broadcast.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read state through a closure
        ///
        /// ```ignore
        /// let brand_count = store.state(|s| s.brands.brands.value().len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&*self.state.read().await)
        }

        /// Run `work` on its own task, counted by `tracking` and by the
        /// store-wide in-flight counter
        fn spawn_tracked<F>(&self, tracking: &EffectTracking, work: F)
        where
            F: Future<Output = ()> + Send + 'static,
        {
            let running = tracking.start();
            let in_flight = InFlightGuard::enter(&self.in_flight);
            tokio::spawn(async move {
                let _guards = (running, in_flight);
                work.await;
            });
        }

        fn execute(&self, effect: Effect<A>, tracking: &EffectTracking)
        where
            R: Clone,
            E: Clone,
        {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Future(fut) => {
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    let store = self.clone();
                    self.spawn_tracked(tracking, async move {
                        if let Some(action) = fut.await {
                            store.feed_back(action).await;
                        }
                    });
                },
                Effect::Delay { duration, action } => {
                    metrics::counter!("store.effects.executed", "type" => "delay").increment(1);
                    tracing::trace!(?duration, "Scheduling delayed action");
                    let store = self.clone();
                    self.spawn_tracked(tracking, async move {
                        tokio::time::sleep(duration).await;
                        store.feed_back(*action).await;
                    });
                },
                Effect::Parallel(effects) => {
                    metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);
                    for effect in effects {
                        self.execute(effect, tracking);
                    }
                },
                Effect::Sequential(effects) => {
                    metrics::counter!("store.effects.executed", "type" => "sequential")
                        .increment(1);
                    let store = self.clone();
                    self.spawn_tracked(tracking, async move {
                        for effect in effects {
                            let (mut step, step_tracking) = EffectHandle::new();
                            store.execute(effect, &step_tracking);
                            step.wait().await;
                        }
                    });
                },
            }
        }

        /// Broadcast an effect's output and reduce it, waiting for whatever
        /// it triggers so the originating handle covers the whole cascade
        async fn feed_back(&self, action: A)
        where
            R: Clone,
            E: Clone,
        {
            let _ = self.action_broadcast.send(action.clone());

            match self.send(action).await {
                Ok(mut handle) => handle.wait().await,
                Err(error) => tracing::debug!(%error, "Dropped effect output"),
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
                config: self.config.clone(),
                shutdown: Arc::clone(&self.shutdown),
                in_flight: Arc::clone(&self.in_flight),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

pub use store::Store;
