//! # Settings Demo
//!
//! A settings screen that embeds a child "notifications" feature and reacts
//! to what the child does, without the child knowing about its parent.
//!
//! This demo showcases:
//! - A child feature with its own state, actions, reducer and environment
//! - A parent holding a [`RelayStore`] before it can supply the relay callback
//! - Relaying the child's actions into a parent [`Binding`]
//! - A presence binding ([`Binding::has_value`]) driving a dismissable banner
//! - `#[derive(CasePaths)]` with [`ReducerExt::relay_case`]
//!
//! ## Example
//!
//! ```no_run
//! use relay_store_testing::test_clock;
//! use settings_demo::{NotificationsAction, SettingsScreen};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let screen = SettingsScreen::new(test_clock());
//! let store = screen.notifications_store();
//!
//! store.send(NotificationsAction::Save).await?.wait().await;
//! # Ok(())
//! # }
//! ```
//!
//! [`ReducerExt::relay_case`]: relay_store_core::ReducerExt::relay_case

use relay_store_core::{
    effect::Effect, environment::Clock, reducer::Reducer, smallvec, Binding, DateTime, SmallVec,
    Utc,
};
use relay_store_macros::CasePaths;
use relay_store_runtime::{RelayStore, RelayedStore};
use serde::Serialize;
use std::sync::Arc;

/// Latest hour a daily digest can be scheduled for
pub const LAST_DIGEST_HOUR: u8 = 23;

/// Notifications state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationsState {
    /// Whether notifications are delivered at all
    pub enabled: bool,
    /// Hour of day (0-23) the daily digest is sent
    pub digest_hour: u8,
    /// When the settings were last saved
    pub last_saved: Option<DateTime<Utc>>,
}

impl Default for NotificationsState {
    fn default() -> Self {
        Self {
            enabled: true,
            digest_hour: 9,
            last_saved: None,
        }
    }
}

impl NotificationsState {
    /// One-line description of the current settings
    #[must_use]
    pub fn summary(&self) -> String {
        if self.enabled {
            format!("Notifications on, digest at {:02}:00", self.digest_hour)
        } else {
            "Notifications off".to_string()
        }
    }
}

/// Notifications actions
#[derive(Debug, Clone, PartialEq, Eq, CasePaths)]
pub enum NotificationsAction {
    /// Turn notifications on or off
    Toggle(bool),
    /// Move the daily digest (clamped to 0-23)
    SetDigestHour(u8),
    /// Persist the current settings
    Save,
    /// Settings were saved (produced by the `Save` effect)
    Saved {
        /// Summary suitable for a confirmation banner
        summary: String,
    },
}

/// Notifications environment
#[derive(Debug, Clone)]
pub struct NotificationsEnvironment<C: Clock> {
    /// Clock used to timestamp saves
    pub clock: C,
}

impl<C: Clock> NotificationsEnvironment<C> {
    /// Create a new notifications environment with the given clock
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }
}

/// Notifications reducer
///
/// Generic over the Clock type C to work with any clock implementation.
#[derive(Debug, Clone, Copy)]
pub struct NotificationsReducer<C> {
    _phantom: std::marker::PhantomData<C>,
}

impl<C> NotificationsReducer<C> {
    /// Create a new notifications reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<C> Default for NotificationsReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Reducer for NotificationsReducer<C> {
    type State = NotificationsState;
    type Action = NotificationsAction;
    type Environment = NotificationsEnvironment<C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            NotificationsAction::Toggle(enabled) => {
                state.enabled = enabled;
                smallvec![Effect::None]
            },
            NotificationsAction::SetDigestHour(hour) => {
                state.digest_hour = hour.min(LAST_DIGEST_HOUR);
                smallvec![Effect::None]
            },
            NotificationsAction::Save => {
                state.last_saved = Some(environment.clock.now());
                let summary = state.summary();
                tracing::debug!(%summary, "Saving notification settings");

                smallvec![Effect::Future(Box::pin(async move {
                    Some(NotificationsAction::Saved { summary })
                }))]
            },
            NotificationsAction::Saved { .. } => smallvec![Effect::None],
        }
    }
}

/// The store a [`SettingsScreen`] builds for its notifications section
pub type NotificationsStore<C> = RelayedStore<NotificationsReducer<C>>;

/// Parent screen embedding the notifications feature
///
/// The screen owns its child's [`RelayStore`] from construction, but the
/// relay callback captures the screen's banner binding, so the real store is
/// only built when [`SettingsScreen::notifications_store`] is first called.
#[derive(Debug)]
pub struct SettingsScreen<C>
where
    C: Clock + Clone + 'static,
{
    notifications: RelayStore<NotificationsReducer<C>>,
    banner: Binding<Option<String>>,
    activity: Binding<Vec<String>>,
}

impl<C> SettingsScreen<C>
where
    C: Clock + Clone + 'static,
{
    /// Create the screen; the notifications store is not built yet
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            notifications: RelayStore::new(
                NotificationsState::default(),
                NotificationsReducer::new(),
                NotificationsEnvironment::new(clock),
            ),
            banner: Binding::variable(None),
            activity: Binding::variable(Vec::new()),
        }
    }

    /// The child store, built with the screen's relay on first use
    pub fn notifications_store(&self) -> Arc<NotificationsStore<C>> {
        let banner = self.banner.clone();
        let activity = self.activity.clone();

        self.notifications.store_with_relay(move |action| {
            activity.update(|mut log| {
                log.push(format!("{action:?}"));
                log
            });

            if let NotificationsAction::Saved { summary } = action {
                tracing::info!(%summary, "Showing saved banner");
                banner.set(Some(summary));
            }
        })
    }

    /// Returns true once the child store has been built
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.notifications.is_constructed()
    }

    /// Banner text, if a banner is showing
    #[must_use]
    pub fn banner(&self) -> Option<String> {
        self.banner.get()
    }

    /// Two-way "banner shown" flag; writing `false` dismisses the banner
    #[must_use]
    pub fn banner_visible(&self) -> Binding<bool> {
        self.banner.has_value()
    }

    /// Every child action the screen has observed, in dispatch order
    #[must_use]
    pub fn activity(&self) -> Vec<String> {
        self.activity.get()
    }
}
