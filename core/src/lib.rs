//! # Relay Store Core
//!
//! Core traits and types for relaying actions out of a reducer.
//!
//! This crate provides the building blocks of a unidirectional data flow
//! architecture, plus the small set of utilities a parent component needs to
//! observe what happens inside a child feature.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//! - **Case path**: Extracts one variant's payload out of an action enum
//! - **Relay**: Forwards dispatched actions to a callback as a side effect
//! - **Binding**: Two-way accessor pairing a getter and a setter
//!
//! ## Example
//!
//! ```
//! use relay_store_core::{smallvec, Effect, Reducer, ReducerExt, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct ToggleState {
//!     on: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum ToggleAction {
//!     Flip,
//! }
//!
//! #[derive(Clone)]
//! struct ToggleReducer;
//!
//! impl Reducer for ToggleReducer {
//!     type State = ToggleState;
//!     type Action = ToggleAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut ToggleState,
//!         action: ToggleAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<ToggleAction>; 4]> {
//!         match action {
//!             ToggleAction::Flip => state.on = !state.on,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! // Observe every action the toggle processes.
//! let relayed = ToggleReducer.relay(|action| println!("toggle saw {action:?}"));
//!
//! let mut state = ToggleState::default();
//! let effects = relayed.reduce(&mut state, ToggleAction::Flip, &());
//! assert!(state.on);
//! assert_eq!(effects.len(), 2);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{smallvec, SmallVec};

pub use binding::Binding;
pub use case_path::CasePath;
pub use composition::{combine_reducers, Combined};
pub use effect::Effect;
pub use reducer::Reducer;
pub use relay::{Relay, Relayed, ReducerExt};

/// Two-way bindings over shared values
pub mod binding;

/// Partial, invertible projections into enum variants
pub mod case_path;

/// Reducer composition utilities
pub mod composition;

/// Action relaying combinators
pub mod relay;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for SettingsReducer {
    ///     type State = SettingsState;
    ///     type Action = SettingsAction;
    ///     type Environment = SettingsEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut SettingsState,
    ///         action: SettingsAction,
    ///         env: &SettingsEnvironment,
    ///     ) -> SmallVec<[Effect<SettingsAction>; 4]> {
    ///         match action {
    ///             SettingsAction::SetVolume(volume) => {
    ///                 state.volume = volume;
    ///                 smallvec![Effect::None]
    ///             }
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// The effects to be executed by the runtime, in order
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use futures::future::BoxFuture;
    use std::time::Duration;

    /// A deferred job that produces no action.
    pub type Job = Box<dyn FnOnce() + Send>;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts, retries)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(BoxFuture<'static, Option<Action>>),

        /// Deferred synchronous job that never feeds an action back
        ///
        /// The runtime runs these jobs after the reduction that produced them,
        /// one at a time and in the order they were produced.
        FireAndForget(Job),
    }

    // Manual Debug implementation since Future and FnOnce don't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::FireAndForget(_) => write!(f, "Effect::FireAndForget(<job>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Schedule `job` to run after the current reduction
        ///
        /// The job cannot feed an action back and is not awaited by the sender.
        #[must_use]
        pub fn fire_and_forget<F>(job: F) -> Effect<Action>
        where
            F: FnOnce() + Send + 'static,
        {
            Effect::FireAndForget(Box::new(job))
        }

        /// Returns true if this effect does nothing
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - uses system clock
    /// struct SystemClock;
    /// impl Clock for SystemClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         Utc::now()
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall clock backed by [`Utc::now`]
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn fire_and_forget_defers_the_job() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let effect: Effect<()> = Effect::fire_and_forget(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let Effect::FireAndForget(job) = effect else {
            unreachable!("constructor builds a FireAndForget effect");
        };
        job();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_hides_closures() {
        let effect: Effect<u8> = Effect::fire_and_forget(|| {});
        assert_eq!(format!("{effect:?}"), "Effect::FireAndForget(<job>)");
        assert!(Effect::<u8>::None.is_none());
    }
}
