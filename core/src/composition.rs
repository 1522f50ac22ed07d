//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers that share the same
//! state, action and environment types:
//! - **`combine_reducers`**: Run a list of boxed reducers on the same state/action
//! - **`Combined`**: Run exactly two reducers, first then second
//!
//! In both cases every reducer sees the same action, state changes are applied
//! in order, and the effects are concatenated in the same order.
//!
//! # Examples
//!
//! ```
//! use relay_store_core::{smallvec, Effect, Reducer, ReducerExt, SmallVec};
//!
//! #[derive(Clone, Default)]
//! struct Volume {
//!     level: u8,
//!     changes: u32,
//! }
//!
//! #[derive(Clone)]
//! enum VolumeAction {
//!     Set(u8),
//! }
//!
//! struct LevelReducer;
//! struct AuditReducer;
//!
//! impl Reducer for LevelReducer {
//!     type State = Volume;
//!     type Action = VolumeAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Volume, action: VolumeAction, _env: &()) -> SmallVec<[Effect<VolumeAction>; 4]> {
//!         let VolumeAction::Set(level) = action;
//!         state.level = level;
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! impl Reducer for AuditReducer {
//!     type State = Volume;
//!     type Action = VolumeAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Volume, _action: VolumeAction, _env: &()) -> SmallVec<[Effect<VolumeAction>; 4]> {
//!         state.changes += 1;
//!         SmallVec::new()
//!     }
//! }
//!
//! let combined = LevelReducer.combined_with(AuditReducer);
//!
//! let mut state = Volume::default();
//! let effects = combined.reduce(&mut state, VolumeAction::Set(7), &());
//! assert_eq!(state.level, 7);
//! assert_eq!(state.changes, 1);
//! assert_eq!(effects.len(), 1);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, and all effects are collected and concatenated.
/// This is useful when you want to split reducer logic across multiple implementations.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type
/// - `E`: The environment type
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducers<S, A, E>
where
    A: Clone,
{
    CombinedReducers { reducers }
}

/// A list of reducers run in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducers<S, A, E> {
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
}

impl<S, A, E> Reducer for CombinedReducers<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Two reducers run one after the other on the same state and action.
///
/// The first reducer's state change and effects always come first.
/// Created by [`ReducerExt::combined_with`](crate::relay::ReducerExt::combined_with).
#[derive(Debug, Clone)]
pub struct Combined<First, Second> {
    first: First,
    second: Second,
}

impl<First, Second> Combined<First, Second> {
    /// Pair two reducers
    #[must_use]
    pub const fn new(first: First, second: Second) -> Self {
        Self { first, second }
    }

    /// The reducer that runs first
    #[must_use]
    pub const fn first(&self) -> &First {
        &self.first
    }

    /// The reducer that runs second
    #[must_use]
    pub const fn second(&self) -> &Second {
        &self.second
    }
}

impl<First, Second> Reducer for Combined<First, Second>
where
    First: Reducer,
    First::Action: Clone,
    Second: Reducer<
            State = First::State,
            Action = First::Action,
            Environment = First::Environment,
        >,
{
    type State = First::State;
    type Action = First::Action;
    type Environment = First::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut effects = self.first.reduce(state, action.clone(), env);
        effects.extend(self.second.reduce(state, action, env));
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::ReducerExt;
    use smallvec::smallvec;

    #[derive(Clone, Default)]
    struct TestState {
        counter: i32,
        name: String,
        log: Vec<&'static str>,
    }

    #[derive(Clone)]
    enum TestAction {
        Increment,
        Decrement,
        SetName(String),
    }

    #[derive(Clone)]
    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            state.log.push("counter");
            match action {
                TestAction::Increment => state.counter += 1,
                TestAction::Decrement => state.counter -= 1,
                TestAction::SetName(_) => {},
            }
            smallvec![Effect::None]
        }
    }

    #[derive(Clone)]
    struct NameReducer;

    impl Reducer for NameReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            state.log.push("name");
            if let TestAction::SetName(name) = action {
                state.name = name;
            }
            smallvec![Effect::Delay {
                duration: std::time::Duration::from_millis(1),
                action: Box::new(TestAction::Increment),
            }]
        }
    }

    #[test]
    fn test_combine_reducers() {
        let combined = combine_reducers(vec![Box::new(CounterReducer), Box::new(NameReducer)]);

        let mut state = TestState::default();

        let _ = combined.reduce(&mut state, TestAction::Increment, &());
        assert_eq!(state.counter, 1);

        let _ = combined.reduce(&mut state, TestAction::SetName("Alice".to_string()), &());
        assert_eq!(state.name, "Alice");

        let effects = combined.reduce(&mut state, TestAction::Decrement, &());
        assert_eq!(state.counter, 0);
        assert_eq!(state.name, "Alice");
        assert_eq!(effects.len(), 2);
    }

    #[test]
    fn test_combined_runs_first_then_second() {
        let combined = CounterReducer.combined_with(NameReducer);

        let mut state = TestState::default();
        let effects = combined.reduce(&mut state, TestAction::Increment, &());

        assert_eq!(state.log, vec!["counter", "name"]);
        assert_eq!(state.counter, 1);
        assert!(effects[0].is_none());
        assert!(matches!(effects[1], Effect::Delay { .. }));
    }
}
