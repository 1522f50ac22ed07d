//! # Relay Store Runtime
//!
//! Runtime implementation for relay-store.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling, plus [`RelayStore`], a holder that builds a relaying
//! store lazily the first time a relay callback is available.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Fire-and-forget lane**: A per-store queue that runs
//!   `Effect::FireAndForget` jobs one at a time, in the order reductions
//!   produced them
//! - **`RelayStore`**: Lazy, construct-once wrapper injecting a relay
//!
//! ## Example
//!
//! ```ignore
//! use relay_store_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use relay_store_core::{
    effect::{Effect, Job},
    reducer::Reducer,
};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, watch, RwLock};

/// Lazily-constructed stores with an injected relay
pub mod relay_store;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),
    }
}

pub use error::StoreError;
pub use relay_store::{RelayStore, RelayedStore};
pub use store::Store;

/// Store configuration
///
/// # Example
///
/// ```
/// use relay_store_runtime::StoreConfig;
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
    /// Capacity of the broadcast channel carrying actions produced by effects
    pub broadcast_capacity: usize,
    /// Timeout used by [`Store::shutdown`]
    pub shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Create a new configuration
    #[must_use]
    pub const fn new(broadcast_capacity: usize, shutdown_timeout: Duration) -> Self {
        Self {
            broadcast_capacity,
            shutdown_timeout,
        }
    }

    /// Set the action broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Set the default shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the effects started by
/// that action to complete. Fire-and-forget jobs count as effects, so waiting
/// on a handle from a relaying store also waits for the relay callback.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::Start).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// // All effects from Action::Start are now complete
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a handle and the tracking context that feeds it
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Number of effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns `Err(())` if the timeout expires before all effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), ()> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| ())
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.pending())
            .finish_non_exhaustive()
    }
}

/// Internal: effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    /// Increment the effect counter (effect started)
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Decrement the effect counter (effect completed)
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements effect counter on drop
///
/// Ensures the effect counter is always decremented, even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Internal: a fire-and-forget job waiting in the lane, with its counters
struct QueuedJob {
    job: Job,
    _effect: DecrementGuard,
    _pending: AtomicCounterGuard,
}

impl QueuedJob {
    fn run(self) {
        let Self {
            job,
            _effect,
            _pending,
        } = self;

        // A panicking job must not take the lane down with it.
        if std::panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            tracing::error!("Fire-and-forget job panicked");
            metrics::counter!("store.effects.panicked", "type" => "fire_and_forget").increment(1);
        }
    }
}

/// Internal: start the task that drains a store's fire-and-forget lane
///
/// The task lives on the runtime current at the call, and ends when that
/// runtime shuts down.
fn spawn_lane() -> mpsc::UnboundedSender<QueuedJob> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<QueuedJob>();

    tokio::spawn(async move {
        while let Some(queued) = receiver.recv().await {
            queued.run();
        }
        tracing::trace!("Fire-and-forget lane closed");
    });

    sender
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        spawn_lane, Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration,
        Effect, EffectHandle, EffectTracking, Mutex, Ordering, PoisonError, QueuedJob, Reducer,
        RwLock, StoreConfig, StoreError, mpsc,
    };
    use tokio::sync::{broadcast, watch};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    ///
    /// # Effect ordering
    ///
    /// `Effect::FireAndForget` jobs returned directly by a reduction (or nested
    /// in `Effect::Parallel`) are queued before the state lock is released, so
    /// they run in exactly the order the actions were reduced. Jobs nested in
    /// `Effect::Sequential` are queued when the sequence reaches them.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        lane: Arc<Mutex<Option<mpsc::UnboundedSender<QueuedJob>>>>,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        /// Action broadcast channel for observing actions produced by effects.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        ///
        /// # Example
        ///
        /// ```ignore
        /// let config = StoreConfig::default()
        ///     .with_shutdown_timeout(Duration::from_secs(60));
        ///
        /// let store = Store::with_config(
        ///     MyState::default(),
        ///     MyReducer,
        ///     my_environment,
        ///     config,
        /// );
        /// ```
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
                lane: Arc::new(Mutex::new(None)),
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                action_broadcast,
            }
        }

        /// The configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Number of effects currently running across all actions
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.pending_effects.load(Ordering::Acquire)
        }

        /// Returns true once shutdown has been initiated
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Gracefully shut down using the configured timeout
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
        /// when [`StoreConfig::shutdown_timeout`] elapses.
        pub async fn shutdown(&self) -> Result<(), StoreError> {
            self.shutdown_within(self.config.shutdown_timeout).await
        }

        /// Initiate graceful shutdown of the store
        ///
        /// This method:
        /// 1. Sets the shutdown flag (rejecting new actions)
        /// 2. Waits for pending effects to complete (with timeout)
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before all
        /// pending effects complete.
        pub async fn shutdown_within(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    metrics::counter!("store.shutdown.completed").increment(1);
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(
                        pending_effects = pending,
                        "Shutdown timeout: {} effects still running", pending
                    );
                    metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Schedules the returned effects, then releases the lock
        /// 4. Effects may produce more actions (feedback loop)
        ///
        /// `send()` returns after scheduling effects, not after they finish;
        /// use the returned [`EffectHandle`] to wait for them.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        ///
        /// # Example
        ///
        /// ```ignore
        /// let mut handle = store.send(SettingsAction::Save).await?;
        /// handle.wait().await;
        /// ```
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError>
        where
            R: Clone,
            E: Clone,
        {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");
            metrics::counter!("store.actions.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let effects = {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                effects
            };

            // Scheduled under the lock so fire-and-forget jobs keep reduction order.
            for effect in effects {
                self.execute_effect_internal(effect, tracking.clone());
            }
            drop(state);

            tracing::debug!("Action processing completed, returning handle");
            Ok(handle)
        }

        /// Subscribe to actions produced by effects
        ///
        /// Only feedback actions (from `Effect::Future` and `Effect::Delay`) are
        /// broadcast, not the actions passed to [`Store::send`].
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let volume = store.state(|s| s.volume).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Queue a fire-and-forget job on this store's lane
        ///
        /// The lane is started on first use. If the runtime that ran it has
        /// shut down, a new lane is started on the current runtime and the
        /// job goes there instead of being lost.
        fn enqueue(&self, job: QueuedJob) {
            let mut lane = self.lane.lock().unwrap_or_else(PoisonError::into_inner);

            let job = match lane.as_ref() {
                Some(sender) => match sender.send(job) {
                    Ok(()) => return,
                    Err(mpsc::error::SendError(job)) => {
                        tracing::debug!("Fire-and-forget lane closed, restarting it");
                        metrics::counter!("store.lane.restarted").increment(1);
                        job
                    },
                },
                None => job,
            };

            let sender = spawn_lane();
            if sender.send(job).is_err() {
                tracing::warn!("Fire-and-forget lane closed on start, dropping job");
            }
            *lane = Some(sender);
        }

        /// Start tracking one effect for both the handle and shutdown
        fn track(&self, tracking: &EffectTracking) -> (DecrementGuard, AtomicCounterGuard) {
            tracking.increment();
            self.pending_effects.fetch_add(1, Ordering::SeqCst);
            (
                DecrementGuard(tracking.clone()),
                AtomicCounterGuard(Arc::clone(&self.pending_effects)),
            )
        }

        /// Execute an effect with tracking
        ///
        /// # Effect Types
        ///
        /// - `None`: No-op
        /// - `Future`: Executes async computation, sends resulting action if `Some`
        /// - `Delay`: Waits for duration, then sends action
        /// - `Parallel`: Executes effects concurrently
        /// - `Sequential`: Executes effects in order, waiting for each to complete
        /// - `FireAndForget`: Queued on the store's ordered lane
        ///
        /// Effect failures are logged and do not halt the store.
        #[allow(clippy::needless_pass_by_value)] // tracking is cloned, so pass by value is intentional
        fn execute_effect_internal(&self, effect: Effect<A>, tracking: EffectTracking)
        where
            R: Clone,
            E: Clone,
        {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::FireAndForget(job) => {
                    tracing::trace!("Queueing Effect::FireAndForget");
                    metrics::counter!("store.effects.executed", "type" => "fire_and_forget")
                        .increment(1);

                    let (effect_guard, pending_guard) = self.track(&tracking);
                    self.enqueue(QueuedJob {
                        job,
                        _effect: effect_guard,
                        _pending: pending_guard,
                    });
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);

                    let guards = self.track(&tracking);
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guards = guards;

                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, sending to store");
                            let _ = store.action_broadcast.send(action.clone());
                            let _ = store.send(action).await;
                        } else {
                            tracing::trace!("Effect::Future completed with no action");
                        }
                    });
                },
                Effect::Delay { duration, action } => {
                    tracing::trace!("Executing Effect::Delay (duration: {:?})", duration);
                    metrics::counter!("store.effects.executed", "type" => "delay").increment(1);

                    let guards = self.track(&tracking);
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guards = guards;

                        tokio::time::sleep(duration).await;
                        tracing::trace!("Effect::Delay completed, sending action");

                        let _ = store.action_broadcast.send((*action).clone());
                        let _ = store.send(*action).await;
                    });
                },
                Effect::Parallel(effects) => {
                    tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                    metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);

                    for effect in effects {
                        self.execute_effect_internal(effect, tracking.clone());
                    }
                },
                Effect::Sequential(effects) => {
                    let effect_count = effects.len();
                    tracing::trace!("Executing Effect::Sequential with {} effects", effect_count);
                    metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);

                    let guards = self.track(&tracking);
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guards = guards;

                        for (idx, effect) in effects.into_iter().enumerate() {
                            tracing::trace!(
                                "Executing sequential effect {} of {}",
                                idx + 1,
                                effect_count
                            );

                            let (sub_tx, mut sub_rx) = watch::channel(());
                            let sub_tracking = EffectTracking {
                                counter: Arc::new(AtomicUsize::new(0)),
                                notifier: sub_tx,
                            };

                            store.execute_effect_internal(effect, sub_tracking.clone());

                            // Wait for this effect to complete before continuing
                            while sub_tracking.counter.load(Ordering::SeqCst) > 0 {
                                if sub_rx.changed().await.is_err() {
                                    break;
                                }
                            }
                        }
                        tracing::trace!("Effect::Sequential completed");
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
                config: self.config.clone(),
                lane: Arc::clone(&self.lane),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("config", &self.config)
                .field("pending_effects", &self.pending_effects.load(Ordering::Acquire))
                .field("shutting_down", &self.shutdown.load(Ordering::Acquire))
                .finish_non_exhaustive()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use relay_store_core::{smallvec, SmallVec};
    use std::sync::Mutex;

    #[derive(Debug, Clone, Default)]
    struct TestState {
        value: i32,
    }

    #[derive(Debug, Clone)]
    enum TestAction {
        Increment,
        Log(&'static str),
        LogTwice(&'static str, &'static str),
        ProduceEffect,
        ProduceDelayedAction,
        ProduceSequentialLogs,
        PanicInJob,
    }

    #[derive(Clone, Default)]
    struct TestEnv {
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl TestEnv {
        fn entries(&self) -> Vec<&'static str> {
            self.log.lock().unwrap().clone()
        }

        fn logger(&self, entry: &'static str) -> Effect<TestAction> {
            let log = Arc::clone(&self.log);
            Effect::fire_and_forget(move || log.lock().unwrap().push(entry))
        }
    }

    #[derive(Debug, Clone)]
    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        #[allow(clippy::panic)] // Intentional panic for testing error handling
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.value += 1;
                    smallvec![Effect::None]
                },
                TestAction::Log(entry) => smallvec![env.logger(entry)],
                TestAction::LogTwice(first, second) => {
                    smallvec![Effect::Parallel(vec![env.logger(first), env.logger(second)])]
                },
                TestAction::ProduceEffect => {
                    smallvec![Effect::Future(Box::pin(async { Some(TestAction::Increment) }))]
                },
                TestAction::ProduceDelayedAction => smallvec![Effect::Delay {
                    duration: Duration::from_millis(10),
                    action: Box::new(TestAction::Increment),
                }],
                TestAction::ProduceSequentialLogs => smallvec![Effect::Sequential(vec![
                    env.logger("one"),
                    Effect::Future(Box::pin(async { Some(TestAction::Increment) })),
                    env.logger("two"),
                ])],
                TestAction::PanicInJob => {
                    smallvec![Effect::fire_and_forget(|| panic!("job failed"))]
                },
            }
        }
    }

    fn store(env: TestEnv) -> Store<TestState, TestAction, TestEnv, TestReducer> {
        Store::new(TestState::default(), TestReducer, env)
    }

    #[tokio::test]
    async fn test_send_updates_state() {
        let store = store(TestEnv::default());
        let _ = store.send(TestAction::Increment).await.unwrap();
        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn test_fire_and_forget_runs_in_send_order() {
        let env = TestEnv::default();
        let store = store(env.clone());

        let _ = store.send(TestAction::Log("a")).await.unwrap();
        let _ = store.send(TestAction::LogTwice("b", "c")).await.unwrap();
        let mut last = store.send(TestAction::Log("d")).await.unwrap();
        last.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

        assert_eq!(env.entries(), vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_handle_waits_for_fire_and_forget() {
        let env = TestEnv::default();
        let store = store(env.clone());

        let mut handle = store.send(TestAction::Log("relayed")).await.unwrap();
        handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

        assert_eq!(handle.pending(), 0);
        assert_eq!(env.entries(), vec!["relayed"]);
    }

    #[tokio::test]
    async fn test_future_feeds_back_and_broadcasts() {
        let store = store(TestEnv::default());
        let mut actions = store.subscribe_actions();

        let mut handle = store.send(TestAction::ProduceEffect).await.unwrap();
        handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

        assert!(matches!(actions.recv().await.unwrap(), TestAction::Increment));
        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn test_delay_feeds_back() {
        let store = store(TestEnv::default());

        let mut handle = store.send(TestAction::ProduceDelayedAction).await.unwrap();
        handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn test_sequential_waits_for_each_effect() {
        let env = TestEnv::default();
        let store = store(env.clone());

        let mut handle = store.send(TestAction::ProduceSequentialLogs).await.unwrap();
        handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

        assert_eq!(env.entries(), vec!["one", "two"]);
        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn test_panicking_job_keeps_lane_alive() {
        relay_store_testing::init_tracing();
        let env = TestEnv::default();
        let store = store(env.clone());

        let _ = store.send(TestAction::PanicInJob).await.unwrap();
        let mut handle = store.send(TestAction::Log("after")).await.unwrap();
        handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

        assert_eq!(env.entries(), vec!["after"]);
    }

    #[tokio::test]
    async fn test_shutdown_rejects_new_actions() {
        let store = store(TestEnv::default());

        store.shutdown_within(Duration::from_secs(1)).await.unwrap();
        assert!(store.is_shutting_down());

        let result = store.send(TestAction::Increment).await;
        assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
    }

    #[tokio::test]
    async fn test_completed_handle_does_not_block() {
        let mut handle = EffectHandle::completed();
        handle.wait_with_timeout(Duration::from_millis(50)).await.unwrap();
        assert_eq!(handle.pending(), 0);
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::default()
            .with_broadcast_capacity(4)
            .with_shutdown_timeout(Duration::from_secs(2));
        assert_eq!(config.broadcast_capacity, 4);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(2));
    }
}
