//! Action relaying.
//!
//! A relay wraps a reducer so that, besides its normal state transition, every
//! dispatched action (or the payload of one chosen variant) is handed to an
//! external callback. The callback runs as an [`Effect::FireAndForget`]: it is
//! deferred until the runtime executes effects, it never touches state and it
//! never dispatches anything.
//!
//! The wrapped reducer's state changes and effects are left exactly as they
//! were; the relay effect is appended after them.
//!
//! ```
//! use relay_store_core::{smallvec, CasePath, Effect, Reducer, ReducerExt, SmallVec};
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Clone, Debug)]
//! enum Action {
//!     Picked(u32),
//!     Dismissed,
//! }
//!
//! #[derive(Clone)]
//! struct Picker;
//!
//! impl Reducer for Picker {
//!     type State = Option<u32>;
//!     type Action = Action;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Option<u32>, action: Action, _env: &()) -> SmallVec<[Effect<Action>; 4]> {
//!         *state = match action {
//!             Action::Picked(value) => Some(value),
//!             Action::Dismissed => None,
//!         };
//!         SmallVec::new()
//!     }
//! }
//!
//! let picked = CasePath::new(Action::Picked, |action: &Action| match action {
//!     Action::Picked(value) => Some(*value),
//!     Action::Dismissed => None,
//! });
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let reducer = Picker.relay_case(picked, move |value| sink.lock().unwrap().push(value));
//!
//! let mut state = None;
//! for effect in reducer.reduce(&mut state, Action::Picked(3), &()) {
//!     if let Effect::FireAndForget(job) = effect {
//!         job();
//!     }
//! }
//! assert_eq!(*seen.lock().unwrap(), vec![3]);
//! assert!(reducer.reduce(&mut state, Action::Dismissed, &()).is_empty());
//! ```

use crate::case_path::CasePath;
use crate::composition::Combined;
use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

type Destination<Value> = Arc<dyn Fn(Value) + Send + Sync>;

/// Reducer that only forwards matching actions to a destination
///
/// It never changes state. On its own it is rarely useful; combine it with
/// the reducer whose actions should be observed, which is what
/// [`ReducerExt::relay`] and [`ReducerExt::relay_case`] do.
pub struct Relay<S, A, E, V> {
    path: CasePath<A, V>,
    destination: Destination<V>,
    _marker: PhantomData<fn(&mut S, &E)>,
}

/// A reducer combined with a relay of its own actions
pub type Relayed<R, V> = Combined<
    R,
    Relay<<R as Reducer>::State, <R as Reducer>::Action, <R as Reducer>::Environment, V>,
>;

impl<S, A, E, V> Relay<S, A, E, V> {
    /// Relay the payloads `path` extracts to `destination`
    pub fn new<F>(path: CasePath<A, V>, destination: F) -> Self
    where
        F: Fn(V) + Send + Sync + 'static,
    {
        Self {
            path,
            destination: Arc::new(destination),
            _marker: PhantomData,
        }
    }
}

impl<S, A, E, V> Reducer for Relay<S, A, E, V>
where
    V: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        _state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match self.path.extract(&action) {
            Some(value) => {
                let destination = Arc::clone(&self.destination);
                smallvec![Effect::fire_and_forget(move || destination(value))]
            },
            None => SmallVec::new(),
        }
    }
}

impl<S, A, E, V> Clone for Relay<S, A, E, V> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            destination: Arc::clone(&self.destination),
            _marker: PhantomData,
        }
    }
}

impl<S, A, E, V> fmt::Debug for Relay<S, A, E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relay")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Combinators available on every [`Reducer`]
pub trait ReducerExt: Reducer + Sized {
    /// Run `self`, then `other`, on the same state and action
    fn combined_with<Other>(self, other: Other) -> Combined<Self, Other>
    where
        Other: Reducer<State = Self::State, Action = Self::Action, Environment = Self::Environment>,
    {
        Combined::new(self, other)
    }

    /// Relay every action sent through this reducer to `destination`
    ///
    /// `destination` is called once per action, after the reduction, in
    /// dispatch order. A panic inside it is not caught.
    fn relay<F>(self, destination: F) -> Relayed<Self, Self::Action>
    where
        Self::Action: Clone + Send + 'static,
        F: Fn(Self::Action) + Send + Sync + 'static,
    {
        self.relay_case(CasePath::identity(), destination)
    }

    /// Relay the payload of the actions `path` matches to `destination`
    ///
    /// Actions of any other variant are skipped without producing an effect.
    fn relay_case<V, F>(self, path: CasePath<Self::Action, V>, destination: F) -> Relayed<Self, V>
    where
        Self::Action: Clone,
        V: Send + 'static,
        F: Fn(V) + Send + Sync + 'static,
    {
        self.combined_with(Relay::new(path, destination))
    }
}

impl<R: Reducer> ReducerExt for R {}
