//! Stores that are built on first use, with a relay injected.
//!
//! A parent component often wants to observe what a child feature does, which
//! means wrapping the child's reducer with [`ReducerExt::relay`]. The relay
//! callback usually needs the fully built parent, so the child store cannot be
//! created while the parent is still being constructed. Creating it later, on
//! every render, would throw the child's state away each time.
//!
//! [`RelayStore`] sits in between:
//!
//! 1. Hold a `RelayStore` where you would hold the child `Store`; its
//!    constructor takes the same arguments.
//! 2. When the child store is actually needed, call
//!    [`RelayStore::store_with_relay`] with the relay callback. The first call
//!    builds the store; every later call returns that same store.
//!
//! # Sharp edge
//!
//! Only the callback supplied on the first call is ever wired in. Callbacks
//! passed to later calls are dropped without being used.

use crate::{Store, StoreConfig};
use relay_store_core::relay::{ReducerExt, Relayed};
use relay_store_core::reducer::Reducer;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// The store a [`RelayStore`] builds for reducer `R`
pub type RelayedStore<R> = Store<
    <R as Reducer>::State,
    <R as Reducer>::Action,
    <R as Reducer>::Environment,
    Relayed<R, <R as Reducer>::Action>,
>;

/// Lazily builds one relaying [`Store`] and hands out that store forever after
///
/// # Example
///
/// ```ignore
/// struct SettingsScreen {
///     notifications: RelayStore<NotificationsReducer>,
///     banner: Binding<Option<String>>,
/// }
///
/// impl SettingsScreen {
///     fn notifications_store(&self) -> Arc<RelayedStore<NotificationsReducer>> {
///         let banner = self.banner.clone();
///         self.notifications.store_with_relay(move |action| {
///             if let NotificationsAction::Saved(summary) = action {
///                 banner.set(Some(summary));
///             }
///         })
///     }
/// }
/// ```
pub struct RelayStore<R>
where
    R: Reducer,
    R::Action: Clone + Send + 'static,
{
    initial_state: R::State,
    reducer: R,
    environment: R::Environment,
    config: StoreConfig,
    store: OnceLock<Arc<RelayedStore<R>>>,
}

impl<R> RelayStore<R>
where
    R: Reducer + Clone + Send + Sync + 'static,
    R::State: Clone + Send + Sync + 'static,
    R::Action: Clone + Send + Sync + 'static,
    R::Environment: Clone + Send + Sync + 'static,
{
    /// Hold everything needed to build the store later
    ///
    /// Nothing is constructed until [`RelayStore::store_with_relay`] is called.
    #[must_use]
    pub fn new(initial_state: R::State, reducer: R, environment: R::Environment) -> Self {
        Self::with_config(initial_state, reducer, environment, StoreConfig::default())
    }

    /// Like [`RelayStore::new`], passing `config` to the store once it is built
    #[must_use]
    pub const fn with_config(
        initial_state: R::State,
        reducer: R,
        environment: R::Environment,
        config: StoreConfig,
    ) -> Self {
        Self {
            initial_state,
            reducer,
            environment,
            config,
            store: OnceLock::new(),
        }
    }

    /// Get the store, building it with `relay` injected on the first call
    ///
    /// Every call after the first returns the same store and ignores `relay`.
    /// Concurrent first calls still build exactly one store.
    pub fn store_with_relay<F>(&self, relay: F) -> Arc<RelayedStore<R>>
    where
        F: Fn(R::Action) + Send + Sync + 'static,
    {
        let mut constructed = false;

        let store = self.store.get_or_init(|| {
            constructed = true;
            tracing::debug!("Building relay store");
            metrics::counter!("relay_store.constructed").increment(1);

            Arc::new(Store::with_config(
                self.initial_state.clone(),
                self.reducer.clone().relay(relay),
                self.environment.clone(),
                self.config.clone(),
            ))
        });

        if !constructed {
            tracing::trace!("Relay store already built, supplied relay callback ignored");
        }

        Arc::clone(store)
    }

    /// The store, if it has been built
    #[must_use]
    pub fn store(&self) -> Option<Arc<RelayedStore<R>>> {
        self.store.get().map(Arc::clone)
    }

    /// Returns true once the store has been built
    #[must_use]
    pub fn is_constructed(&self) -> bool {
        self.store.get().is_some()
    }

    /// The state the store starts from when it is built
    #[must_use]
    pub const fn initial_state(&self) -> &R::State {
        &self.initial_state
    }
}

impl<R> fmt::Debug for RelayStore<R>
where
    R: Reducer,
    R::Action: Clone + Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayStore")
            .field("constructed", &self.store.get().is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use relay_store_core::{smallvec, Effect, SmallVec};
    use relay_store_testing::RelayRecorder;
    use std::time::Duration;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct TestState {
        last: Option<i32>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        SomeAction(i32),
    }

    #[derive(Clone)]
    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            let TestAction::SomeAction(value) = action;
            state.last = Some(value);
            smallvec![Effect::None]
        }
    }

    #[test]
    fn test_nothing_is_built_up_front() {
        let relay_store = RelayStore::new(TestState::default(), TestReducer, ());
        assert!(!relay_store.is_constructed());
        assert!(relay_store.store().is_none());
        assert_eq!(relay_store.initial_state(), &TestState::default());
    }

    #[tokio::test]
    async fn test_relayed_value_reaches_callback() {
        let relay_store = RelayStore::new(TestState::default(), TestReducer, ());
        let recorder = RelayRecorder::new();

        let store = relay_store.store_with_relay(recorder.destination());
        let mut handle = store.send(TestAction::SomeAction(42)).await.unwrap();
        handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

        assert_eq!(recorder.values(), vec![TestAction::SomeAction(42)]);
        assert_eq!(store.state(|s| s.last).await, Some(42));
    }

    #[tokio::test]
    async fn test_store_is_cached_and_later_relays_ignored() {
        let relay_store = RelayStore::new(TestState::default(), TestReducer, ());
        let first = RelayRecorder::new();
        let second = RelayRecorder::new();

        let store = relay_store.store_with_relay(first.destination());
        let again = relay_store.store_with_relay(second.destination());
        assert!(Arc::ptr_eq(&store, &again));
        assert!(Arc::ptr_eq(&store, &relay_store.store().unwrap()));

        let mut handle = again.send(TestAction::SomeAction(7)).await.unwrap();
        handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

        assert_eq!(first.values(), vec![TestAction::SomeAction(7)]);
        assert!(second.values().is_empty());
    }

    #[test]
    fn test_concurrent_first_calls_build_once() {
        let relay_store = Arc::new(RelayStore::new(TestState::default(), TestReducer, ()));

        let stores: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let relay_store = Arc::clone(&relay_store);
                    scope.spawn(move || relay_store.store_with_relay(|_| {}))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for store in &stores[1..] {
            assert!(Arc::ptr_eq(&stores[0], store));
        }
    }

    #[test]
    fn test_config_is_forwarded() {
        let config = StoreConfig::default().with_shutdown_timeout(Duration::from_millis(250));
        let relay_store = RelayStore::with_config(TestState::default(), TestReducer, (), config);

        let store = relay_store.store_with_relay(|_| {});
        assert_eq!(store.config().shutdown_timeout, Duration::from_millis(250));
    }
}
