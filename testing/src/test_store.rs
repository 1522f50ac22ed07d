//! A store that runs effects inline, for exhaustive reducer tests.
//!
//! [`TestStore`] reduces actions exactly like the runtime store, but instead
//! of scheduling effects it executes them immediately and in order:
//!
//! - `FireAndForget` jobs run before `send` returns
//! - `Future` effects are awaited; a produced action is queued for
//!   [`TestStore::receive`] rather than fed back automatically
//! - `Delay` effects queue their action without sleeping
//! - `Parallel` and `Sequential` effects are flattened in declaration order
//!
//! Every queued action must be received before the store is dropped, which
//! keeps tests honest about the feedback their reducers produce.

#![allow(clippy::module_name_repetitions)] // TestStore is the natural name

use relay_store_core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;
use std::fmt::Debug;

/// Deterministic, single-threaded stand-in for the runtime store
///
/// # Example
///
/// ```ignore
/// let mut store = TestStore::new(State::default(), reducer, ());
///
/// store.send(Action::Load, |state| assert!(state.loading)).await;
/// store.receive(Action::Loaded(3), |state| assert_eq!(state.items, 3)).await;
/// store.finish();
/// ```
pub struct TestStore<R: Reducer> {
    reducer: R,
    state: R::State,
    environment: R::Environment,
    received: VecDeque<R::Action>,
}

impl<R> TestStore<R>
where
    R: Reducer,
    R::Action: Debug + PartialEq,
{
    /// Create a test store
    #[must_use]
    pub fn new(initial_state: R::State, reducer: R, environment: R::Environment) -> Self {
        Self {
            reducer,
            state: initial_state,
            environment,
            received: VecDeque::new(),
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &R::State {
        &self.state
    }

    /// Actions produced by effects and not yet received
    #[must_use]
    pub const fn pending_actions(&self) -> &VecDeque<R::Action> {
        &self.received
    }

    /// Send an action, run its effects, then check the resulting state
    pub async fn send<F>(&mut self, action: R::Action, assert_state: F)
    where
        F: FnOnce(&R::State),
    {
        self.dispatch(action).await;
        assert_state(&self.state);
    }

    /// Receive the next action produced by an effect and reduce it
    ///
    /// # Panics
    ///
    /// Panics if no action is pending or the next one differs from `expected`.
    #[allow(clippy::panic)] // Test assertion
    pub async fn receive<F>(&mut self, expected: R::Action, assert_state: F)
    where
        F: FnOnce(&R::State),
    {
        let Some(action) = self.received.pop_front() else {
            panic!("Expected to receive {expected:?}, but no action was produced");
        };
        assert_eq!(
            action, expected,
            "Received an unexpected action from an effect"
        );

        self.dispatch(action).await;
        assert_state(&self.state);
    }

    /// Assert that every action produced by effects has been received
    ///
    /// # Panics
    ///
    /// Panics if actions are still pending.
    #[allow(clippy::panic)] // Test assertion
    pub fn finish(self) {
        assert!(
            self.received.is_empty(),
            "Test store finished with unreceived actions: {:?}",
            self.received
        );
    }

    async fn dispatch(&mut self, action: R::Action) {
        let effects = self.reducer.reduce(&mut self.state, action, &self.environment);

        let mut queue: VecDeque<Effect<R::Action>> = effects.into_iter().collect();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::None => {},
                Effect::FireAndForget(job) => job(),
                Effect::Future(fut) => {
                    if let Some(action) = fut.await {
                        self.received.push_back(action);
                    }
                },
                Effect::Delay { action, .. } => self.received.push_back(*action),
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    for effect in effects.into_iter().rev() {
                        queue.push_front(effect);
                    }
                },
            }
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use relay_store_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect other than `Effect::None` is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert how many fire-and-forget jobs (such as relays) were produced
    ///
    /// # Panics
    ///
    /// Panics if the count doesn't match.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_fire_and_forget_count<A>(effects: &[Effect<A>], expected: usize) {
        let found = effects
            .iter()
            .filter(|e| matches!(e, Effect::FireAndForget(_)))
            .count();
        assert_eq!(
            found, expected,
            "Expected {expected} fire-and-forget effects, but found {found}"
        );
    }
}
