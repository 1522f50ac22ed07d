//! # Relay Store Testing
//!
//! Testing utilities and helpers for relay-store.
//!
//! This crate provides:
//! - [`TestStore`]: runs a reducer and its effects inline and deterministically
//! - [`RelayRecorder`]: a relay destination that records what it receives
//! - Mock implementations of Environment traits
//! - Tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use relay_store_core::ReducerExt;
//! use relay_store_testing::{RelayRecorder, TestStore};
//!
//! #[tokio::test]
//! async fn relays_saved_settings() {
//!     let recorder = RelayRecorder::new();
//!     let mut store = TestStore::new(
//!         SettingsState::default(),
//!         SettingsReducer.relay(recorder.destination()),
//!         SettingsEnvironment::default(),
//!     );
//!
//!     store.send(SettingsAction::Save, |state| assert!(state.saved)).await;
//!     assert_eq!(recorder.values(), vec![SettingsAction::Save]);
//! }
//! ```

use chrono::{DateTime, Utc};
use relay_store_core::environment::Clock;
use std::sync::{Arc, Mutex, PoisonError};

/// Deterministic store for tests
pub mod test_store;

pub use test_store::TestStore;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use relay_store_testing::mocks::FixedClock;
    /// use relay_store_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }
}

/// Records every value relayed to it
///
/// Clones share the same record, so a test can hand
/// [`destination`](RelayRecorder::destination) to a relay and inspect the
/// recorder afterwards.
#[derive(Debug)]
pub struct RelayRecorder<T> {
    values: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for RelayRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
        }
    }
}

impl<T> Default for RelayRecorder<T> {
    fn default() -> Self {
        Self {
            values: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Send + 'static> RelayRecorder<T> {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A relay destination that appends to this recorder
    pub fn destination(&self) -> impl Fn(T) + Send + Sync + use<T> {
        let values = Arc::clone(&self.values);
        move |value: T| {
            values
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(value);
        }
    }

    /// Number of values recorded so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if nothing has been relayed yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> RelayRecorder<T> {
    /// Snapshot of the recorded values, in the order they arrived
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Install a `tracing` subscriber for tests
///
/// Honors `RUST_LOG` and writes through the test harness's captured output.
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_store_runtime=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
